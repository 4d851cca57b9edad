//! jingles-core: catalogue import core library.
//!
//! This crate exposes the pieces of the CSV → graph import path as public
//! modules, plus the shared entity types used by every layer.
//!
//! # Architecture
//!
//! ```text
//! CSV cell ──► date::normalize ──┐
//!                                ├──► import::Importer ──► rows for schema::merge_statement
//! ids::IdGenerator ──────────────┘
//! ```
//!
//! Everything here is synchronous and free of shared mutable state; the graph
//! database that consumes the rows lives outside this workspace.

pub mod config;
pub mod date;
pub mod error;
pub mod ids;
pub mod import;
pub mod schema;
pub mod types;

pub use date::{normalize, normalize_required};
pub use error::{DateParseError, EntityKindError, IdError, ImportError};
pub use ids::IdGenerator;
pub use import::{ImportReport, ImportedRow, Importer, RowFailure};
pub use types::EntityKind;
