//! One complete run: fetch a tab, parse it, write the resource files.
//!
//! Run parameters live in a [`RunConfig`], usually loaded from TOML:
//!
//! ```toml
//! source = "translations.csv"
//! tab = "Strings"
//! key_column = "key"
//! res_dir = "app/src/main/res"
//! platform = "android"
//! strict = true
//!
//! [default_localization]
//! lang = "en"
//! path = "app/src/main/res/values/strings.xml"
//!
//! [formats]
//! count = "integer"
//! name = "string"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    parser::{DEFAULT_KEY_COLUMN, DEFAULT_LANG_COLUMN_PATTERN, ParseOptions, Parsed, parse_tab},
    platforms::PlatformType,
    source::TabSource,
    types::{Diagnostic, Formats},
    writer::{DefaultLocalization, WriteOptions, write_localizations},
};

/// Run parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Identifies the spreadsheet; for file sources, the export's path.
    pub source: String,
    /// Name of the tab holding the translations.
    pub tab: String,
    #[serde(default = "default_key_column")]
    pub key_column: String,
    /// Root directory for generated resources. Must exist.
    pub res_dir: PathBuf,
    pub platform: PlatformType,
    #[serde(default)]
    pub strict: bool,
    #[serde(default = "default_lang_column_pattern")]
    pub lang_column_pattern: String,
    #[serde(default)]
    pub default_localization: Option<DefaultLocalization>,
    #[serde(default)]
    pub formats: Formats,
}

fn default_key_column() -> String {
    DEFAULT_KEY_COLUMN.to_string()
}

fn default_lang_column_pattern() -> String {
    DEFAULT_LANG_COLUMN_PATTERN.to_string()
}

impl RunConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        Ok(toml::from_str(s)?)
    }

    /// Loads a config file. Relative `source`, `res_dir` and default
    /// localization paths are taken relative to the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.rebase(base);
        }
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        let source = Path::new(&self.source);
        if source.is_relative() {
            self.source = base.join(source).to_string_lossy().into_owned();
        }
        if self.res_dir.is_relative() {
            self.res_dir = base.join(&self.res_dir);
        }
        if let Some(default) = &mut self.default_localization {
            if default.path.is_relative() && !default.path.as_os_str().is_empty() {
                default.path = base.join(&default.path);
            }
        }
    }

    pub fn parse_options(&self) -> Result<ParseOptions, Error> {
        ParseOptions::new(self.key_column.clone())
            .with_strict(self.strict)
            .with_lang_pattern(&self.lang_column_pattern)
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            default_localization: self.default_localization.clone(),
        }
    }
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Written files, ordered by language.
    pub written: Vec<PathBuf>,
    /// Rows and cells skipped in lenient mode, and duplicate keys.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of keys written.
    pub keys: usize,
}

/// Fetches `config.tab` from `source`, parses it and writes the files.
///
/// Nothing is written unless parsing succeeds.
pub fn run(config: &RunConfig, source: &dyn TabSource) -> Result<RunReport, Error> {
    let platform = config.platform.platform();
    let options = config.parse_options()?;

    let tab = source.fetch(&config.tab)?;
    let Parsed {
        localizations,
        diagnostics,
    } = parse_tab(tab, &options, platform.as_ref(), &config.formats)?;

    let written = write_localizations(
        platform.as_ref(),
        &config.res_dir,
        &localizations,
        &config.write_options(),
    )?;

    tracing::info!(
        tab = %config.tab,
        platform = %config.platform,
        keys = localizations.len(),
        files = written.len(),
        warnings = diagnostics.len(),
        "generated localizations"
    );

    Ok(RunReport {
        written,
        diagnostics,
        keys: localizations.len(),
    })
}
