//! Android `strings.xml` resources.
//!
//! Files land in `<res>/values-<qualifier>/strings.xml`, where the qualifier
//! follows Android's resource naming (`pt-rBR`, `b+zh+Hans`).

use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use indoc::indoc;
use quick_xml::escape::{escape, partial_escape};
use unic_langid::LanguageIdentifier;

use super::{Platform, escape_percent};
use crate::types::FormatKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct Android;

impl Platform for Android {
    fn name(&self) -> &'static str {
        "android"
    }

    fn localization_dir(&self, lang: &str, res_dir: &Path) -> PathBuf {
        res_dir.join(format!("values-{}", resource_qualifier(lang)))
    }

    fn localization_file_name(&self, _lang: &str) -> String {
        "strings.xml".to_string()
    }

    fn header(&self, _lang: &str) -> String {
        indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <!-- This file is automatically generated by sheetloc. Do not edit it manually. -->
            <resources>
        "#}
        .to_string()
    }

    fn footer(&self, _lang: &str) -> String {
        "</resources>\n".to_string()
    }

    fn localization(&self, _lang: &str, key: &str, value: &str) -> String {
        format!(
            "    <string name=\"{}\">{}</string>\n",
            escape(key),
            escape_value(value)
        )
    }

    fn indexed_format(&self, index: usize, kind: FormatKind) -> Result<String, String> {
        let conversion = match kind {
            FormatKind::String => 's',
            FormatKind::Integer => 'd',
            FormatKind::Float => 'f',
            FormatKind::Object => {
                return Err("Android string resources have no object placeholder".to_string());
            }
        };
        Ok(format!("%{}${}", index + 1, conversion))
    }

    fn escape_literal<'a>(&self, text: &'a str) -> Cow<'a, str> {
        escape_percent(text)
    }
}

/// Maps a language code to the `values-` directory qualifier.
///
/// Plain languages and language-region pairs use the legacy form (`en`,
/// `pt-rBR`). Anything carrying a script or variant needs BCP 47 form
/// (`b+zh+Hans`). Codes that don't parse are used as-is.
pub fn resource_qualifier(lang: &str) -> String {
    let Ok(id) = lang.parse::<LanguageIdentifier>() else {
        return lang.to_string();
    };

    if id.script.is_some() || id.variants().next().is_some() {
        let subtags: Vec<String> = id
            .to_string()
            .split('-')
            .map(str::to_string)
            .collect();
        return format!("b+{}", subtags.join("+"));
    }

    match id.region {
        Some(region) => format!("{}-r{}", id.language, region),
        None => id.language.to_string(),
    }
}

/// Escapes a value for the body of a `<string>` element.
fn escape_value(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    let escaped = partial_escape(&escaped).into_owned();
    match escaped.chars().next() {
        Some('@') | Some('?') => format!("\\{}", escaped),
        _ => escaped,
    }
}
