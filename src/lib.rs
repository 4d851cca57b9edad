//! jingles: catalogue import tooling.
//!
//! The binary is a thin shell over [`cli`]; every domain operation lives in
//! `jingles-core`, re-exported here so integration tests and benches can
//! import either crate.
//!
//! # Architecture
//!
//! ```text
//! jingles date    ──► date::normalize
//! jingles id      ──► ids::IdGenerator
//! jingles schema  ──► schema::schema_statements
//! jingles import  ──► import::Importer ──► JSON lines for the graph loader
//! ```

pub mod cli;

pub use jingles_core::*;
