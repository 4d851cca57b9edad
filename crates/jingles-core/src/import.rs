//! CSV importer. Turns CSV rows into graph-ready property maps for one entity kind.
//!
//! Each column is converted according to the kind's declared [`Property`]
//! type; columns the schema does not know are passed through as strings.
//! Date columns go through [`normalize`] (optional) or [`normalize_required`]
//! (required), so every stored date is a canonical timestamp.
//!
//! A row that cannot be converted yields one [`RowFailure`]; what happens next
//! is decided by [`InvalidRowPolicy`].

use std::io::Read;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::{ImportConfig, InvalidRowPolicy};
use crate::date::{normalize, normalize_required};
use crate::error::ImportError;
use crate::ids::IdGenerator;
use crate::schema::{self, Property, PropertyType};
use crate::types::EntityKind;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// One converted CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedRow {
    /// 1-based line of the record in the source file.
    pub line: u64,
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// A required date cell no rule could interpret.
    InvalidDate,
    /// A required column is not in the header.
    MissingColumn,
    /// A required non-date cell is empty.
    MissingValue,
    /// The `id` cell is empty and ID generation is off.
    MissingId,
    InvalidInteger,
    InvalidBoolean,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::InvalidDate => write!(f, "invalid date"),
            FailureReason::MissingColumn => write!(f, "missing column"),
            FailureReason::MissingValue => write!(f, "missing value"),
            FailureReason::MissingId => write!(f, "missing id"),
            FailureReason::InvalidInteger => write!(f, "invalid integer"),
            FailureReason::InvalidBoolean => write!(f, "invalid boolean"),
        }
    }
}

/// Why a row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    pub line: u64,
    pub column: String,
    /// The offending cell, empty when the cell or column was absent.
    pub input: String,
    pub reason: FailureReason,
}

impl RowFailure {
    pub fn new(line: u64, column: &str, input: &str, reason: FailureReason) -> Self {
        Self {
            line,
            column: column.to_string(),
            input: input.to_string(),
            reason,
        }
    }
}

impl std::fmt::Display for RowFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: column `{}`: {} ({:?})",
            self.line, self.column, self.reason, self.input
        )
    }
}

/// Outcome of one import run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    pub kind: EntityKind,
    pub rows: Vec<ImportedRow>,
    pub failures: Vec<RowFailure>,
}

/// Counts only, for logs and `--report`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub kind: EntityKind,
    pub imported: usize,
    pub failed: usize,
}

impl ImportReport {
    /// Parameters for [`schema::merge_statement`]: `{"rows": [ {...}, ... ]}`.
    pub fn batch(&self) -> Value {
        let rows = self
            .rows
            .iter()
            .map(|row| Value::Object(row.properties.clone()))
            .collect();
        let mut params = Map::new();
        params.insert("rows".to_string(), Value::Array(rows));
        Value::Object(params)
    }

    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            kind: self.kind,
            imported: self.rows.len(),
            failed: self.failures.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Importer
// ---------------------------------------------------------------------------

pub struct Importer {
    kind: EntityKind,
    config: ImportConfig,
    ids: IdGenerator,
}

impl Importer {
    pub fn new(kind: EntityKind, config: ImportConfig, ids: IdGenerator) -> Self {
        Self { kind, config, ids }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Import CSV (with a header row) from any reader.
    pub fn run<R: Read>(&self, reader: R) -> Result<ImportReport, ImportError> {
        let mut csv = self.reader_builder()?.from_reader(reader);
        self.convert_all(&mut csv)
    }

    /// Import a CSV file from disk.
    pub fn run_path(&self, path: &Path) -> Result<ImportReport, ImportError> {
        let mut csv = self.reader_builder()?.from_path(path)?;
        self.convert_all(&mut csv)
    }

    fn reader_builder(&self) -> Result<csv::ReaderBuilder, ImportError> {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(true)
            .flexible(true)
            .delimiter(self.config.delimiter_byte()?)
            .trim(if self.config.trim_cells {
                csv::Trim::All
            } else {
                csv::Trim::None
            });
        Ok(builder)
    }

    fn convert_all<R: Read>(&self, csv: &mut csv::Reader<R>) -> Result<ImportReport, ImportError> {
        let headers = csv.headers()?.clone();
        let mut report = ImportReport {
            kind: self.kind,
            rows: Vec::new(),
            failures: Vec::new(),
        };

        for record in csv.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            match self.convert_record(&headers, &record, line) {
                Ok(row) => report.rows.push(row),
                Err(failure) => match self.config.on_invalid {
                    InvalidRowPolicy::Abort => return Err(ImportError::Row(failure)),
                    InvalidRowPolicy::Skip => {
                        tracing::warn!(kind = %self.kind, %failure, "skipping row");
                        report.failures.push(failure);
                    }
                },
            }
        }

        let summary = report.summary();
        tracing::info!(
            kind = %summary.kind,
            imported = summary.imported,
            failed = summary.failed,
            "import finished"
        );
        Ok(report)
    }

    fn convert_record(
        &self,
        headers: &csv::StringRecord,
        record: &csv::StringRecord,
        line: u64,
    ) -> Result<ImportedRow, RowFailure> {
        // Required columns must exist even when every cell would be empty.
        for p in schema::properties(self.kind) {
            if p.required && p.name != "id" && !headers.iter().any(|h| h == p.name) {
                return Err(RowFailure::new(line, p.name, "", FailureReason::MissingColumn));
            }
        }

        let mut properties = Map::new();
        for (column, cell) in headers.iter().zip(record.iter()) {
            if column.is_empty() {
                continue;
            }
            let declared = schema::property(self.kind, column);
            if let Some(value) = self.convert_cell(line, column, cell, declared)? {
                properties.insert(column.to_string(), value);
            }
        }

        // Short rows: required cells past the end of the record.
        for p in schema::properties(self.kind) {
            if p.required && p.name != "id" && !properties.contains_key(p.name) {
                let reason = if p.ty == PropertyType::DateTime {
                    FailureReason::InvalidDate
                } else {
                    FailureReason::MissingValue
                };
                return Err(RowFailure::new(line, p.name, "", reason));
            }
        }

        if !properties.contains_key("id") {
            if !self.config.generate_missing_ids {
                return Err(RowFailure::new(line, "id", "", FailureReason::MissingId));
            }
            let id = self.ids.generate(self.kind);
            tracing::debug!(kind = %self.kind, line, %id, "generated id");
            properties.insert("id".to_string(), Value::String(id));
        }

        Ok(ImportedRow { line, properties })
    }

    /// `Ok(None)` means the cell is left out of the row.
    fn convert_cell(
        &self,
        line: u64,
        column: &str,
        cell: &str,
        declared: Option<&Property>,
    ) -> Result<Option<Value>, RowFailure> {
        let failure = |input: &str, reason| RowFailure::new(line, column, input, reason);

        let Some(p) = declared else {
            return Ok((!cell.is_empty()).then(|| Value::String(cell.to_string())));
        };

        if p.ty == PropertyType::DateTime {
            if p.required {
                return normalize_required(cell)
                    .map(|ts| Some(Value::String(ts)))
                    .map_err(|err| failure(err.input(), FailureReason::InvalidDate));
            }
            let normalized = normalize(cell);
            if normalized.is_none() && !cell.trim().is_empty() {
                tracing::warn!(kind = %self.kind, column, input = cell, "dropping unparseable optional date");
            }
            return Ok(normalized.map(Value::String));
        }

        if cell.is_empty() {
            if p.required && p.name != "id" {
                return Err(failure(cell, FailureReason::MissingValue));
            }
            return Ok(None);
        }

        let value = match p.ty {
            PropertyType::String | PropertyType::DateTime => Value::String(cell.to_string()),
            PropertyType::Integer => cell
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| failure(cell, FailureReason::InvalidInteger))?,
            PropertyType::Boolean => parse_bool(cell)
                .map(Value::Bool)
                .ok_or_else(|| failure(cell, FailureReason::InvalidBoolean))?,
            PropertyType::StringList => Value::Array(
                cell.split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| Value::String(s.to_string()))
                    .collect(),
            ),
        };
        Ok(Some(value))
    }
}

fn parse_bool(cell: &str) -> Option<bool> {
    match cell.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "si" | "sí" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
