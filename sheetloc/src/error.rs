//! All error types for the sheetloc crate.
//!
//! Every stage of the pipeline (reading a tab, parsing it, substituting
//! placeholders, writing resource files) returns these. Variants carry the
//! tab, line, key, language or path needed to find the problem in the source
//! spreadsheet without re-running anything.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(r#"there's no first row in the "{tab}" tab"#)]
    MissingFirstRow { tab: String },

    #[error(r#""{column}" column not found in the first row of "{tab}" tab"#)]
    KeyColumnNotFound { column: String, tab: String },

    #[error(r#""{column}" column appears more than once in the first row of "{tab}" tab"#)]
    DuplicateKeyColumn { column: String, tab: String },

    #[error(r#"language columns are not found in the "{tab}" tab"#)]
    NoLanguageColumns { tab: String },

    #[error(r#"language "{lang}" appears in more than one column of "{tab}" tab"#)]
    DuplicateLanguage { lang: String, tab: String },

    #[error("{tab}!{line}: cell in column {column} is not a plain value")]
    InvalidCell {
        tab: String,
        line: usize,
        column: usize,
    },

    #[error(r#"key name is missing for line {line} in "{tab}" tab"#)]
    KeyMissing { tab: String, line: usize },

    #[error(r#"{tab}!{line}: "{key}" is missing for "{lang}" language"#)]
    LocalizationMissing {
        tab: String,
        line: usize,
        key: String,
        lang: String,
    },

    #[error("{tab}!{line}: malformed placeholder, fix the value in this row")]
    MalformedPlaceholder { tab: String, line: usize },

    #[error(r#"{tab}!{line}: no such format - "{name}""#)]
    UndeclaredFormat {
        tab: String,
        line: usize,
        name: String,
    },

    #[error(r#"{tab}!{line}: can't use the "{name}" format on {platform}: {reason}"#)]
    UnsupportedFormat {
        tab: String,
        line: usize,
        name: String,
        platform: String,
        reason: String,
    },

    #[error("resources directory {path} is not usable: {source}")]
    ResDirUnreachable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(r#"can't write "{lang}" localizations to {path}: {source}"#)]
    Write {
        path: PathBuf,
        lang: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown platform `{0}`")]
    UnknownPlatform(String),

    #[error("unknown format kind `{0}`")]
    UnknownFormatKind(String),

    #[error("invalid language column pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error came from a missing key or a missing translation,
    /// i.e. the kind of problem lenient mode downgrades to a warning.
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            Error::KeyMissing { .. } | Error::LocalizationMissing { .. }
        )
    }
}
