//! Named placeholder substitution.
//!
//! Source strings reference formats by name, e.g. `"{name} has {count} items"`.
//! [`substitute`] swaps each `{name}` for the platform's positional token
//! (`%1$s`, `%2$d`, `{0}` ...), numbering occurrences left to right.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{error::Error, platforms::Platform, types::Formats};

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"\{[^{}]*\}").unwrap();
}

/// Where a string came from, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    pub tab: &'a str,
    /// 1-based line number, as shown by the spreadsheet.
    pub line: usize,
}

impl<'a> Location<'a> {
    pub fn new(tab: &'a str, line: usize) -> Self {
        Self { tab, line }
    }
}

/// Replaces every `{name}` in `raw` with the platform's native token.
///
/// Positions start at 0 and advance once per placeholder occurrence, whatever
/// its name, so `"{a} {b} {a}"` gets positions 0, 1 and 2. Text between
/// placeholders goes through [`Platform::escape_literal`]; a string without
/// placeholders is returned unchanged.
///
/// # Errors
///
/// - [`Error::MalformedPlaceholder`] for `{}`, a blank name, or a `{` / `}`
///   that is not part of a complete token (`"Hello {name"`, `"{{name}}"`).
/// - [`Error::UndeclaredFormat`] when the name is not in `formats`.
/// - [`Error::UnsupportedFormat`] when the platform has no token for the kind.
pub fn substitute(
    platform: &dyn Platform,
    raw: &str,
    formats: &Formats,
    location: &Location,
) -> Result<String, Error> {
    let malformed = || Error::MalformedPlaceholder {
        tab: location.tab.to_string(),
        line: location.line,
    };

    let mut tokens = PLACEHOLDER_REGEX.find_iter(raw).peekable();
    if tokens.peek().is_none() {
        return if has_stray_brace(raw) {
            Err(malformed())
        } else {
            Ok(raw.to_string())
        };
    }

    let mut out = String::with_capacity(raw.len() + 8);
    let mut last = 0;
    let mut index = 0;

    for token in tokens {
        let literal = &raw[last..token.start()];
        if has_stray_brace(literal) {
            return Err(malformed());
        }
        out.push_str(&platform.escape_literal(literal));

        let name = placeholder_name(token.as_str()).ok_or_else(malformed)?;
        let kind = formats.get(name).ok_or_else(|| Error::UndeclaredFormat {
            tab: location.tab.to_string(),
            line: location.line,
            name: name.to_string(),
        })?;
        let native =
            platform
                .indexed_format(index, *kind)
                .map_err(|reason| Error::UnsupportedFormat {
                    tab: location.tab.to_string(),
                    line: location.line,
                    name: name.to_string(),
                    platform: platform.name().to_string(),
                    reason,
                })?;

        out.push_str(&native);
        index += 1;
        last = token.end();
    }

    let tail = &raw[last..];
    if has_stray_brace(tail) {
        return Err(malformed());
    }
    out.push_str(&platform.escape_literal(tail));
    Ok(out)
}

/// Lists placeholder names in order of appearance. Blank tokens are skipped.
pub fn placeholder_names(raw: &str) -> Vec<&str> {
    PLACEHOLDER_REGEX
        .find_iter(raw)
        .filter_map(|m| placeholder_name(m.as_str()))
        .collect()
}

fn has_stray_brace(literal: &str) -> bool {
    literal.contains(['{', '}'])
}

fn placeholder_name(token: &str) -> Option<&str> {
    let name = token.strip_prefix('{')?.strip_suffix('}')?.trim();
    if name.is_empty() { None } else { Some(name) }
}
