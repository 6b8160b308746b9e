#![forbid(unsafe_code)]
//! Generate platform localization files from a translation spreadsheet.
//!
//! A spreadsheet tab holds one row per key and one `lang_<code>` column per
//! language. sheetloc parses the tab into [`Localizations`], rewrites named
//! placeholders such as `{count}` into the platform's positional tokens and
//! writes one resource file per language.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sheetloc::{DelimitedFileSource, RunConfig, run};
//!
//! let config = RunConfig::from_file("sheetloc.toml")?;
//! let source = DelimitedFileSource::from_path(&config.source);
//! let report = run(&config, &source)?;
//! for warning in &report.diagnostics {
//!     eprintln!("warning: {}", warning);
//! }
//! # Ok::<(), sheetloc::Error>(())
//! ```
//!
//! # Supported Platforms
//!
//! - **Android**: `values-<lang>/strings.xml`, `%1$s` placeholders
//! - **Apple**: `<lang>.lproj/Localizable.strings`, `%1$@` placeholders
//! - **Java properties**: `messages_<lang>.properties`, `{0}` placeholders

pub mod error;
pub mod parser;
pub mod pipeline;
pub mod placeholder;
pub mod platforms;
pub mod source;
pub mod types;
pub mod writer;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    parser::{ParseOptions, Parsed, parse_grid, parse_tab, resolve_columns},
    pipeline::{RunConfig, RunReport, run},
    placeholder::{Location, substitute},
    platforms::{Platform, PlatformType},
    source::{DelimitedFileSource, MemorySource, TabSource},
    types::{Diagnostic, FormatKind, Formats, Grid, Localizations, Tab},
    writer::{DefaultLocalization, WriteOptions, write_localizations},
};
