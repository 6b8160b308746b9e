//! Core types for sheetloc.
//! Tab sources produce [`Tab`]s; the parser turns them into [`Localizations`];
//! the writer serializes those.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::Display,
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// A translation key: trimmed and never empty.
pub type Key = String;

/// A language code captured from a header cell, e.g. `en` from `lang_en`.
pub type Lang = String;

/// Format table: placeholder name (without braces) to its kind.
pub type Formats = HashMap<String, FormatKind>;

/// A named grid of raw cell values, as returned by a spreadsheet API.
///
/// Row 0 is the header row. Cells are loosely typed; use [`Tab::into_grid`]
/// to turn them into text before parsing.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Tab {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl Tab {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Builds a tab from string cells. An empty string becomes an absent cell.
    pub fn from_strings<R, C>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| match cell.as_ref() {
                        "" => Value::Null,
                        text => Value::String(text.to_string()),
                    })
                    .collect()
            })
            .collect();
        Self::new(name, rows)
    }

    /// Converts every cell to optional text, once, up front.
    ///
    /// Strings pass through, `null` is an absent cell, numbers and booleans are
    /// rendered as text. Arrays and objects cannot be a translation and fail
    /// with [`Error::InvalidCell`].
    pub fn into_grid(self) -> Result<Grid, Error> {
        let Tab { name, rows } = self;
        let mut typed = Vec::with_capacity(rows.len());
        for (row_index, row) in rows.into_iter().enumerate() {
            let mut cells = Vec::with_capacity(row.len());
            for (column, cell) in row.into_iter().enumerate() {
                let cell = match cell {
                    Value::Null => None,
                    Value::String(s) => Some(s),
                    Value::Bool(b) => Some(b.to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Array(_) | Value::Object(_) => {
                        return Err(Error::InvalidCell {
                            tab: name,
                            line: row_index + 1,
                            column: column + 1,
                        });
                    }
                };
                cells.push(cell);
            }
            typed.push(cells);
        }
        Ok(Grid { tab: name, rows: typed })
    }
}

/// A tab whose cells have been converted to optional text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    pub tab: String,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Grid {
    /// Returns the cell at `row`/`column`, treating short rows as absent cells.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }
}

/// Kind of value a named placeholder stands for.
///
/// Each [`crate::platforms::Platform`] decides how (and whether) a kind is
/// rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum FormatKind {
    /// Free text.
    String,
    /// Whole number.
    Integer,
    /// Floating point number.
    Float,
    /// An object rendered through its description (Apple `%@`).
    Object,
}

impl Display for FormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatKind::String => write!(f, "string"),
            FormatKind::Integer => write!(f, "integer"),
            FormatKind::Float => write!(f, "float"),
            FormatKind::Object => write!(f, "object"),
        }
    }
}

impl FromStr for FormatKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "str" | "s" => Ok(FormatKind::String),
            "integer" | "int" | "d" => Ok(FormatKind::Integer),
            "float" | "double" | "f" => Ok(FormatKind::Float),
            "object" | "obj" | "@" => Ok(FormatKind::Object),
            other => Err(Error::UnknownFormatKind(other.to_string())),
        }
    }
}

impl TryFrom<String> for FormatKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FormatKind> for String {
    fn from(value: FormatKind) -> Self {
        value.to_string()
    }
}

/// The parsed model: key to language to the final, substituted string.
///
/// Internally hash-based, so iteration order is unspecified. Use
/// [`Localizations::keys`], [`Localizations::languages`] or
/// [`Localizations::by_language`] when order matters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Localizations(HashMap<Key, HashMap<Lang, String>>);

impl Localizations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores all translations of `key`, returning the previous ones if the
    /// key was already present.
    pub(crate) fn insert(
        &mut self,
        key: Key,
        translations: HashMap<Lang, String>,
    ) -> Option<HashMap<Lang, String>> {
        self.0.insert(key, translations)
    }

    pub fn get(&self, key: &str, lang: &str) -> Option<&str> {
        self.0.get(key)?.get(lang).map(String::as_str)
    }

    pub fn translations(&self, key: &str) -> Option<&HashMap<Lang, String>> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.0.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Every language that has at least one translation, sorted.
    pub fn languages(&self) -> Vec<&str> {
        self.by_language().into_keys().collect()
    }

    /// Regroups the model per language, with keys sorted inside each group.
    pub fn by_language(&self) -> BTreeMap<&str, BTreeMap<&str, &str>> {
        let mut grouped: BTreeMap<&str, BTreeMap<&str, &str>> = BTreeMap::new();
        for (key, translations) in &self.0 {
            for (lang, value) in translations {
                grouped
                    .entry(lang.as_str())
                    .or_default()
                    .insert(key.as_str(), value.as_str());
            }
        }
        grouped
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &HashMap<Lang, String>)> {
        self.0.iter()
    }
}

impl FromIterator<(Key, HashMap<Lang, String>)> for Localizations {
    fn from_iter<T: IntoIterator<Item = (Key, HashMap<Lang, String>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A problem that lenient parsing recovered from by skipping data.
///
/// Returned to the caller alongside the model so embedding tools can show or
/// check them without a global logger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The row had no key and was skipped.
    KeyMissing { tab: String, line: usize },
    /// The cell was empty; the (key, lang) pair was left out.
    LocalizationMissing {
        tab: String,
        line: usize,
        key: Key,
        lang: Lang,
    },
    /// A later row reused a key; its translations replaced the earlier row's.
    DuplicateKey {
        tab: String,
        key: Key,
        previous_line: usize,
        line: usize,
    },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::KeyMissing { tab, line } => {
                write!(f, r#"key name is missing for line {} in "{}" tab"#, line, tab)
            }
            Diagnostic::LocalizationMissing {
                tab,
                line,
                key,
                lang,
            } => write!(
                f,
                r#"{}!{}: "{}" is missing for "{}" language"#,
                tab, line, key, lang
            ),
            Diagnostic::DuplicateKey {
                tab,
                key,
                previous_line,
                line,
            } => write!(
                f,
                r#"{}!{}: "{}" was already defined on line {}, the later row wins"#,
                tab, line, key, previous_line
            ),
        }
    }
}
