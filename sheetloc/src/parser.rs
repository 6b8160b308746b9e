//! Turns a [`Tab`] into [`Localizations`].
//!
//! The header row is resolved into column indices first ([`resolve_columns`]),
//! then every data row is validated and its translations run through
//! [`crate::placeholder::substitute`].
//!
//! In strict mode a missing key or translation fails the whole parse. In
//! lenient mode the row (or cell) is skipped and reported as a
//! [`Diagnostic`].

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    placeholder::{Location, substitute},
    platforms::Platform,
    types::{Diagnostic, Formats, Grid, Key, Lang, Localizations, Tab},
};

/// Header cells named `lang_<code>` are language columns by default.
pub const DEFAULT_LANG_COLUMN_PATTERN: &str = r"^lang_(.+)$";

/// Header cell naming the key column by default.
pub const DEFAULT_KEY_COLUMN: &str = "key";

lazy_static! {
    static ref DEFAULT_LANG_COLUMN_REGEX: Regex = Regex::new(DEFAULT_LANG_COLUMN_PATTERN).unwrap();
}

/// How a tab is read.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Exact text of the key column's header cell.
    pub key_column: String,
    /// Fail on missing keys/translations instead of skipping them.
    pub strict: bool,
    /// Matches language header cells. Capture group 1 (or the whole match
    /// when there is no group) is the language code.
    pub lang_column_pattern: Regex,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_COLUMN)
    }
}

impl ParseOptions {
    /// Lenient options with the default language column pattern.
    pub fn new(key_column: impl Into<String>) -> Self {
        Self {
            key_column: key_column.into(),
            strict: false,
            lang_column_pattern: DEFAULT_LANG_COLUMN_REGEX.clone(),
        }
    }

    /// Enables/disables strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Replaces the language column pattern.
    pub fn with_lang_pattern(mut self, pattern: &str) -> Result<Self, Error> {
        self.lang_column_pattern = Regex::new(pattern)?;
        Ok(self)
    }
}

/// Column layout of a tab, resolved from its header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    /// Index of the key column.
    pub key: usize,
    /// Language columns in header order.
    pub languages: Vec<(usize, Lang)>,
}

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parsed {
    pub localizations: Localizations,
    /// Everything lenient mode skipped, plus duplicate keys, in row order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Locates the key column (exact match) and every language column (pattern
/// match) in `header`.
///
/// The key column must match `key_column` exactly, untrimmed, and appear
/// once. A header cell equal to `key_column` is never treated as a language
/// column.
pub fn resolve_columns(
    header: &[Option<String>],
    key_column: &str,
    pattern: &Regex,
    tab: &str,
) -> Result<Columns, Error> {
    let mut key = None;
    let mut languages: Vec<(usize, Lang)> = Vec::new();

    for (index, cell) in header.iter().enumerate() {
        let Some(cell) = cell.as_deref() else {
            continue;
        };

        if cell == key_column {
            if key.replace(index).is_some() {
                return Err(Error::DuplicateKeyColumn {
                    column: key_column.to_string(),
                    tab: tab.to_string(),
                });
            }
            continue;
        }
        let cell = cell.trim();

        let Some(captures) = pattern.captures(cell) else {
            continue;
        };
        let lang = captures
            .get(1)
            .or_else(|| captures.get(0))
            .map(|m| m.as_str().trim())
            .unwrap_or_default();
        if lang.is_empty() {
            continue;
        }
        if languages.iter().any(|(_, existing)| existing == lang) {
            return Err(Error::DuplicateLanguage {
                lang: lang.to_string(),
                tab: tab.to_string(),
            });
        }
        languages.push((index, lang.to_string()));
    }

    let key = key.ok_or_else(|| Error::KeyColumnNotFound {
        column: key_column.to_string(),
        tab: tab.to_string(),
    })?;

    if languages.is_empty() {
        return Err(Error::NoLanguageColumns {
            tab: tab.to_string(),
        });
    }

    Ok(Columns { key, languages })
}

/// Parses a raw tab: converts its cells, then runs [`parse_grid`].
pub fn parse_tab(
    tab: Tab,
    options: &ParseOptions,
    platform: &dyn Platform,
    formats: &Formats,
) -> Result<Parsed, Error> {
    let grid = tab.into_grid()?;
    parse_grid(&grid, options, platform, formats)
}

/// Parses a typed grid into the localization model.
///
/// Grid row `i` is reported as line `i + 1`, matching spreadsheet numbering.
/// When two rows share a key, the later row's translations replace the
/// earlier row's and a [`Diagnostic::DuplicateKey`] is recorded.
///
/// # Errors
///
/// Structural errors always fail. [`Error::KeyMissing`] and
/// [`Error::LocalizationMissing`] fail only in strict mode. Placeholder
/// errors fail in both modes.
pub fn parse_grid(
    grid: &Grid,
    options: &ParseOptions,
    platform: &dyn Platform,
    formats: &Formats,
) -> Result<Parsed, Error> {
    let tab = grid.tab.as_str();
    let header = grid.rows.first().ok_or_else(|| Error::MissingFirstRow {
        tab: tab.to_string(),
    })?;
    let columns = resolve_columns(
        header,
        &options.key_column,
        &options.lang_column_pattern,
        tab,
    )?;

    let mut localizations = Localizations::new();
    let mut diagnostics = Vec::new();
    let mut seen: HashMap<Key, usize> = HashMap::new();

    for row in 1..grid.rows.len() {
        let line = row + 1;

        let key = grid
            .cell(row, columns.key)
            .map(str::trim)
            .filter(|k| !k.is_empty());
        let Some(key) = key else {
            if options.strict {
                return Err(Error::KeyMissing {
                    tab: tab.to_string(),
                    line,
                });
            }
            report(
                &mut diagnostics,
                Diagnostic::KeyMissing {
                    tab: tab.to_string(),
                    line,
                },
            );
            continue;
        };

        let mut translations = HashMap::with_capacity(columns.languages.len());
        for (column, lang) in &columns.languages {
            let value = grid
                .cell(row, *column)
                .map(str::trim)
                .filter(|v| !v.is_empty());
            match value {
                Some(value) => {
                    let value = substitute(platform, value, formats, &Location::new(tab, line))?;
                    translations.insert(lang.clone(), value);
                }
                None if options.strict => {
                    return Err(Error::LocalizationMissing {
                        tab: tab.to_string(),
                        line,
                        key: key.to_string(),
                        lang: lang.clone(),
                    });
                }
                None => report(
                    &mut diagnostics,
                    Diagnostic::LocalizationMissing {
                        tab: tab.to_string(),
                        line,
                        key: key.to_string(),
                        lang: lang.clone(),
                    },
                ),
            }
        }

        if translations.is_empty() {
            continue;
        }

        if let Some(previous_line) = seen.insert(key.to_string(), line) {
            report(
                &mut diagnostics,
                Diagnostic::DuplicateKey {
                    tab: tab.to_string(),
                    key: key.to_string(),
                    previous_line,
                    line,
                },
            );
        }
        localizations.insert(key.to_string(), translations);
    }

    tracing::debug!(
        tab,
        keys = localizations.len(),
        languages = columns.languages.len(),
        skipped = diagnostics.len(),
        "parsed tab"
    );

    Ok(Parsed {
        localizations,
        diagnostics,
    })
}

fn report(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    tracing::warn!("{}", diagnostic);
    diagnostics.push(diagnostic);
}
