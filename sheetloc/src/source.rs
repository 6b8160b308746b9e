//! Where tabs come from.
//!
//! The pipeline only needs a grid of cells per tab name. Spreadsheet API
//! clients implement [`TabSource`] themselves; this module ships an in-memory
//! source and one reading CSV/TSV exports.

use std::{
    collections::HashMap,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::{error::Error, types::Tab};

/// Provides the raw cells of a named tab.
pub trait TabSource {
    /// Fetches the tab called `tab`. Row 0 must be the header row.
    fn fetch(&self, tab: &str) -> Result<Tab, Error>;
}

/// Tabs held in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tabs: HashMap<String, Tab>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.add_tab(tab);
        self
    }

    pub fn add_tab(&mut self, tab: Tab) {
        self.tabs.insert(tab.name.clone(), tab);
    }
}

impl TabSource for MemorySource {
    /// An unknown tab has no first row.
    fn fetch(&self, tab: &str) -> Result<Tab, Error> {
        self.tabs
            .get(tab)
            .cloned()
            .ok_or_else(|| Error::MissingFirstRow {
                tab: tab.to_string(),
            })
    }
}

/// A spreadsheet exported as CSV or TSV.
///
/// The file is one tab; any requested tab name is accepted and reported
/// back in errors. UTF-8/UTF-16 byte order marks are honored. Empty cells
/// become absent cells.
#[derive(Debug, Clone)]
pub struct DelimitedFileSource {
    path: PathBuf,
    delimiter: u8,
}

impl DelimitedFileSource {
    pub fn csv<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
        }
    }

    pub fn tsv<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: b'\t',
        }
    }

    /// Picks the delimiter from the extension: `.tsv`/`.tab` → tab, else comma.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|s| s.to_str()) {
            Some("tsv") | Some("tab") => Self::tsv(path),
            _ => Self::csv(path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses delimited text into a tab.
    pub fn parse_str(&self, tab: &str, content: &str) -> Result<Tab, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|cell| match cell {
                        "" => Value::Null,
                        text => Value::String(text.to_string()),
                    })
                    .collect(),
            );
        }

        if rows.is_empty() {
            return Err(Error::MissingFirstRow {
                tab: tab.to_string(),
            });
        }

        Ok(Tab::new(tab, rows))
    }
}

impl TabSource for DelimitedFileSource {
    fn fetch(&self, tab: &str) -> Result<Tab, Error> {
        let file = File::open(&self.path)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut content = String::new();
        decoder.read_to_string(&mut content)?;

        self.parse_str(tab, &content)
    }
}
