//! Core types for jingles-core.
//!
//! [`EntityKind`] enumerates the node kinds of the catalogue graph and owns
//! the fixed kind → label and kind → ID-prefix tables.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EntityKindError;

/// A node kind in the catalogue graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A short musical performance excerpt.
    Jingle,
    /// A source episode/video jingles are extracted from.
    Fabrica,
    /// The canonical song a jingle is a version of.
    Cancion,
    /// A performer, author or contributor.
    Artista,
    /// A thematic tag applied to jingles.
    Tematica,
    /// A user account.
    Usuario,
}

impl EntityKind {
    /// Every kind, in schema order.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Jingle,
        EntityKind::Fabrica,
        EntityKind::Cancion,
        EntityKind::Artista,
        EntityKind::Tematica,
        EntityKind::Usuario,
    ];

    /// Node label used in graph statements.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Jingle => "Jingle",
            EntityKind::Fabrica => "Fabrica",
            EntityKind::Cancion => "Cancion",
            EntityKind::Artista => "Artista",
            EntityKind::Tematica => "Tematica",
            EntityKind::Usuario => "Usuario",
        }
    }

    /// Single-character prefix of generated IDs.
    pub fn prefix(self) -> char {
        match self {
            EntityKind::Jingle => 'j',
            EntityKind::Fabrica => 'f',
            EntityKind::Cancion => 'c',
            EntityKind::Artista => 'a',
            EntityKind::Tematica => 't',
            EntityKind::Usuario => 'u',
        }
    }

    pub fn from_prefix(prefix: char) -> Option<EntityKind> {
        Self::ALL.into_iter().find(|kind| kind.prefix() == prefix)
    }

    fn name(self) -> &'static str {
        match self {
            EntityKind::Jingle => "jingle",
            EntityKind::Fabrica => "fabrica",
            EntityKind::Cancion => "cancion",
            EntityKind::Artista => "artista",
            EntityKind::Tematica => "tematica",
            EntityKind::Usuario => "usuario",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = EntityKindError;

    /// Accepts the lowercase name, the label, or the plural, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jingle" | "jingles" => Ok(EntityKind::Jingle),
            "fabrica" | "fabricas" => Ok(EntityKind::Fabrica),
            "cancion" | "canciones" => Ok(EntityKind::Cancion),
            "artista" | "artistas" => Ok(EntityKind::Artista),
            "tematica" | "tematicas" => Ok(EntityKind::Tematica),
            "usuario" | "usuarios" => Ok(EntityKind::Usuario),
            _ => Err(EntityKindError::Unknown(s.to_string())),
        }
    }
}
