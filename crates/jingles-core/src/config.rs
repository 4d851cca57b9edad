//! Configuration types for jingles.
//!
//! [`Config::load`] reads `~/.config/jingles/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist, then applies `JINGLES_*`
//! environment overrides (`JINGLES_IMPORT__ON_INVALID=abort`).
//! [`Config::load_from`] layers an explicit file instead. [`Config::defaults`]
//! returns the built-in defaults without touching the filesystem (useful in
//! tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{IdError, ImportError};
use crate::ids::IdGenerator;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[import]
delimiter            = ","
on_invalid           = "skip"
generate_missing_ids = true
trim_cells           = true

[ids]
suffix_len = 8
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/jingles/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub ids: IdsConfig,
}

/// What the importer does with a row it cannot convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRowPolicy {
    /// Record the failure and keep going.
    Skip,
    /// Stop at the first failure.
    Abort,
}

/// `[import]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default = "default_on_invalid")]
    pub on_invalid: InvalidRowPolicy,
    #[serde(default = "default_generate_missing_ids")]
    pub generate_missing_ids: bool,
    #[serde(default = "default_trim_cells")]
    pub trim_cells: bool,
}

fn default_delimiter() -> String { ",".to_string() }
fn default_on_invalid() -> InvalidRowPolicy { InvalidRowPolicy::Skip }
fn default_generate_missing_ids() -> bool { true }
fn default_trim_cells() -> bool { true }

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            on_invalid: default_on_invalid(),
            generate_missing_ids: default_generate_missing_ids(),
            trim_cells: default_trim_cells(),
        }
    }
}

impl ImportConfig {
    /// The delimiter as the single byte the CSV reader wants.
    pub fn delimiter_byte(&self) -> Result<u8, ImportError> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(ImportError::Delimiter(self.delimiter.clone())),
        }
    }
}

/// `[ids]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct IdsConfig {
    #[serde(default = "default_suffix_len")]
    pub suffix_len: usize,
}

fn default_suffix_len() -> usize { crate::ids::DEFAULT_SUFFIX_LEN }

impl Default for IdsConfig {
    fn default() -> Self {
        Self {
            suffix_len: default_suffix_len(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/jingles/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .add_source(
                config::Environment::with_prefix("JINGLES")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Load an explicit file layered over the built-in defaults. The file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// The ID generator described by `[ids]`.
    pub fn id_generator(&self) -> Result<IdGenerator, IdError> {
        IdGenerator::new(self.ids.suffix_len)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("jingles")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
