//! Entity ID generation.
//!
//! IDs are the kind's prefix char followed by a random `[0-9a-z]` suffix,
//! e.g. `j3k9x0a2q`. Suffixes come from `rand::thread_rng()`, a CSPRNG.

use rand::Rng;

use crate::error::IdError;
use crate::types::EntityKind;

pub const MIN_SUFFIX_LEN: usize = 4;
pub const MAX_SUFFIX_LEN: usize = 32;
pub const DEFAULT_SUFFIX_LEN: usize = 8;

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates prefixed entity IDs of a fixed suffix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdGenerator {
    suffix_len: usize,
}

impl IdGenerator {
    pub fn new(suffix_len: usize) -> Result<Self, IdError> {
        if !(MIN_SUFFIX_LEN..=MAX_SUFFIX_LEN).contains(&suffix_len) {
            return Err(IdError::SuffixLength(suffix_len));
        }
        Ok(Self { suffix_len })
    }

    pub fn suffix_len(&self) -> usize {
        self.suffix_len
    }

    /// A fresh ID for `kind`.
    pub fn generate(&self, kind: EntityKind) -> String {
        let mut rng = rand::thread_rng();
        let mut id = String::with_capacity(1 + self.suffix_len);
        id.push(kind.prefix());
        id.extend(
            (0..self.suffix_len)
                .map(|_| char::from(SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())])),
        );
        id
    }

    /// Infer the kind of a generated-shaped ID from its prefix.
    ///
    /// Returns `None` for IDs that do not look generated (unknown prefix,
    /// empty or non-`[0-9a-z]` suffix), whatever their length.
    pub fn kind_of(id: &str) -> Option<EntityKind> {
        let mut chars = id.chars();
        let kind = EntityKind::from_prefix(chars.next()?)?;
        let suffix = chars.as_str();
        let well_formed = !suffix.is_empty()
            && suffix
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase());
        well_formed.then_some(kind)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self {
            suffix_len: DEFAULT_SUFFIX_LEN,
        }
    }
}
