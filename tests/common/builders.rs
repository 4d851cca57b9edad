//! Test builders: ergonomic constructors for CSV inputs and importers.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use jingles_core::config::{ImportConfig, InvalidRowPolicy};
use jingles_core::{EntityKind, IdGenerator, Importer};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// CsvBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for CSV fixtures.
///
/// # Example
///
/// ```rust
/// let csv = CsvBuilder::new(&["id", "title", "date"])
///     .row(&["f1", "Ep 1", "25/12/2023"])
///     .delimiter(';')
///     .build();
/// ```
pub struct CsvBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    delimiter: char,
}

impl CsvBuilder {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            delimiter: ',',
        }
    }

    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Cells containing the delimiter or a quote are quoted.
    pub fn build(&self) -> String {
        let sep = self.delimiter.to_string();
        let line = |cells: &[String]| {
            cells
                .iter()
                .map(|c| {
                    if c.contains(self.delimiter) || c.contains('"') {
                        format!("\"{}\"", c.replace('"', "\"\""))
                    } else {
                        c.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(&sep)
        };
        let mut out = line(&self.headers);
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(row));
            out.push('\n');
        }
        out
    }

    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        crate::common::write_fixture(dir, name, &self.build())
    }
}

// ---------------------------------------------------------------------------
// ImporterBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Importer`] with default config unless overridden.
pub struct ImporterBuilder {
    kind: EntityKind,
    config: ImportConfig,
    suffix_len: usize,
}

impl ImporterBuilder {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            config: ImportConfig::default(),
            suffix_len: 8,
        }
    }

    pub fn abort_on_invalid(mut self) -> Self {
        self.config.on_invalid = InvalidRowPolicy::Abort;
        self
    }

    pub fn delimiter(mut self, delimiter: &str) -> Self {
        self.config.delimiter = delimiter.to_string();
        self
    }

    pub fn no_generated_ids(mut self) -> Self {
        self.config.generate_missing_ids = false;
        self
    }

    pub fn suffix_len(mut self, suffix_len: usize) -> Self {
        self.suffix_len = suffix_len;
        self
    }

    pub fn build(self) -> Importer {
        let ids = IdGenerator::new(self.suffix_len).expect("test suffix length must be valid");
        Importer::new(self.kind, self.config, ids)
    }
}
