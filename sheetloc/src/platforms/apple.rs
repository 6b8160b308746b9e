//! Apple `.strings` resources in `<lang>.lproj/Localizable.strings`.

use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use indoc::formatdoc;

use super::{Platform, escape_percent};
use crate::types::FormatKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct Apple;

impl Platform for Apple {
    fn name(&self) -> &'static str {
        "ios"
    }

    fn localization_dir(&self, lang: &str, res_dir: &Path) -> PathBuf {
        res_dir.join(format!("{}.lproj", lang))
    }

    fn localization_file_name(&self, _lang: &str) -> String {
        "Localizable.strings".to_string()
    }

    fn header(&self, lang: &str) -> String {
        formatdoc! {"
            // This file is automatically generated by sheetloc.
            // Do not edit it manually, as your changes will be overwritten.
            //
            //: Language: {}
            //

            ",
            lang
        }
    }

    fn footer(&self, _lang: &str) -> String {
        String::new()
    }

    fn localization(&self, _lang: &str, key: &str, value: &str) -> String {
        format!("\"{}\" = \"{}\";\n", escape(key), escape(value))
    }

    fn indexed_format(&self, index: usize, kind: FormatKind) -> Result<String, String> {
        let conversion = match kind {
            FormatKind::String | FormatKind::Object => "@",
            FormatKind::Integer => "ld",
            FormatKind::Float => "f",
        };
        Ok(format!("%{}${}", index + 1, conversion))
    }

    fn escape_literal<'a>(&self, text: &'a str) -> Cow<'a, str> {
        escape_percent(text)
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
