//! Java `.properties` resource bundles, read through `ResourceBundle` and
//! formatted with `java.text.MessageFormat`.

use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use indoc::formatdoc;

use super::Platform;
use crate::types::FormatKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct Properties;

impl Platform for Properties {
    fn name(&self) -> &'static str {
        "properties"
    }

    fn localization_dir(&self, _lang: &str, res_dir: &Path) -> PathBuf {
        res_dir.to_path_buf()
    }

    fn localization_file_name(&self, lang: &str) -> String {
        format!("messages_{}.properties", lang.replace('-', "_"))
    }

    fn header(&self, lang: &str) -> String {
        formatdoc! {"
            # This file is automatically generated by sheetloc.
            # Do not edit it manually, as your changes will be overwritten.
            # Language: {}

            ",
            lang
        }
    }

    fn footer(&self, _lang: &str) -> String {
        String::new()
    }

    fn localization(&self, _lang: &str, key: &str, value: &str) -> String {
        format!("{}={}\n", escape(key, true), escape(value, false))
    }

    fn indexed_format(&self, index: usize, kind: FormatKind) -> Result<String, String> {
        Ok(match kind {
            FormatKind::String | FormatKind::Object => format!("{{{}}}", index),
            FormatKind::Integer => format!("{{{},number,integer}}", index),
            FormatKind::Float => format!("{{{},number}}", index),
        })
    }

    /// `MessageFormat` treats `'` as a quote character.
    fn escape_literal<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if text.contains('\'') {
            Cow::Owned(text.replace('\'', "''"))
        } else {
            Cow::Borrowed(text)
        }
    }
}

/// Escapes text for a `.properties` key or value. Output is pure ASCII.
fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' if is_key => {
                out.push('\\');
                out.push(c);
            }
            '#' | '!' if i == 0 => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii() => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
        }
    }
    out
}
