//! Error types for jingles-core.

use crate::import::RowFailure;
use crate::ids::{MAX_SUFFIX_LEN, MIN_SUFFIX_LEN};

/// A date cell that no normalization rule could interpret.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("invalid date format: {input:?}")]
    InvalidFormat { input: String },
}

impl DateParseError {
    /// The raw input exactly as the caller passed it (empty for an absent value).
    pub fn input(&self) -> &str {
        match self {
            DateParseError::InvalidFormat { input } => input,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityKindError {
    #[error("unknown entity kind `{0}`; expected jingle|fabrica|cancion|artista|tematica|usuario")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error(
        "id suffix length {0} out of range; expected {min}..={max}",
        min = MIN_SUFFIX_LEN,
        max = MAX_SUFFIX_LEN
    )]
    SuffixLength(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid delimiter {0:?}; expected a single ASCII character")]
    Delimiter(String),
    #[error("import aborted: {0}")]
    Row(RowFailure),
}
