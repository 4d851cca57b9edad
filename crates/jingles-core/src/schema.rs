//! Graph schema: node properties, relationships, and the Cypher statements
//! that declare constraints and indexes in the graph store.
//!
//! The store enforces these; this module only describes them. Every
//! `DateTime` property holds a canonical timestamp produced by
//! [`crate::date::normalize`].

use serde::Serialize;

use crate::types::EntityKind;

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    String,
    Integer,
    Boolean,
    DateTime,
    /// `;`-separated in CSV, a list in the graph.
    StringList,
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyType::String => write!(f, "string"),
            PropertyType::Integer => write!(f, "integer"),
            PropertyType::Boolean => write!(f, "boolean"),
            PropertyType::DateTime => write!(f, "datetime"),
            PropertyType::StringList => write!(f, "string list"),
        }
    }
}

/// A node property and the constraints the store keeps on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: &'static str,
    pub ty: PropertyType,
    pub required: bool,
    pub unique: bool,
    pub indexed: bool,
}

impl Property {
    const fn new(name: &'static str, ty: PropertyType) -> Self {
        Self {
            name,
            ty,
            required: false,
            unique: false,
            indexed: false,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    const fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }
}

const ID: Property = Property::new("id", PropertyType::String).required().unique();
const CREATED_AT: Property = Property::new("createdAt", PropertyType::DateTime);
const UPDATED_AT: Property = Property::new("updatedAt", PropertyType::DateTime);

const JINGLE: &[Property] = &[
    ID,
    Property::new("title", PropertyType::String).indexed(),
    Property::new("timestamp", PropertyType::Integer),
    Property::new("comment", PropertyType::String),
    Property::new("isJinglazo", PropertyType::Boolean),
    Property::new("isPrecario", PropertyType::Boolean),
    Property::new("tags", PropertyType::StringList),
    CREATED_AT,
    UPDATED_AT,
];

const FABRICA: &[Property] = &[
    ID,
    Property::new("title", PropertyType::String).indexed(),
    Property::new("date", PropertyType::DateTime).required().indexed(),
    Property::new("youtubeUrl", PropertyType::String),
    Property::new("duration", PropertyType::Integer),
    CREATED_AT,
    UPDATED_AT,
];

const CANCION: &[Property] = &[
    ID,
    Property::new("title", PropertyType::String).indexed(),
    Property::new("album", PropertyType::String),
    Property::new("year", PropertyType::Integer),
    Property::new("genre", PropertyType::String),
    CREATED_AT,
    UPDATED_AT,
];

const ARTISTA: &[Property] = &[
    ID,
    Property::new("name", PropertyType::String).indexed(),
    Property::new("stageName", PropertyType::String),
    Property::new("nationality", PropertyType::String),
    Property::new("isArg", PropertyType::Boolean),
    CREATED_AT,
    UPDATED_AT,
];

const TEMATICA: &[Property] = &[
    ID,
    Property::new("name", PropertyType::String).indexed(),
    Property::new("category", PropertyType::String),
    Property::new("description", PropertyType::String),
    CREATED_AT,
    UPDATED_AT,
];

const USUARIO: &[Property] = &[
    ID,
    Property::new("email", PropertyType::String).required().unique(),
    Property::new("displayName", PropertyType::String),
    Property::new("role", PropertyType::String),
    CREATED_AT,
    UPDATED_AT,
    Property::new("lastLogin", PropertyType::DateTime),
];

/// Every declared property of `kind`, `id` first.
pub fn properties(kind: EntityKind) -> &'static [Property] {
    match kind {
        EntityKind::Jingle => JINGLE,
        EntityKind::Fabrica => FABRICA,
        EntityKind::Cancion => CANCION,
        EntityKind::Artista => ARTISTA,
        EntityKind::Tematica => TEMATICA,
        EntityKind::Usuario => USUARIO,
    }
}

pub fn property(kind: EntityKind, name: &str) -> Option<&'static Property> {
    properties(kind).iter().find(|p| p.name == name)
}

/// The `DateTime` properties of `kind`.
pub fn date_properties(kind: EntityKind) -> impl Iterator<Item = &'static Property> {
    properties(kind)
        .iter()
        .filter(|p| p.ty == PropertyType::DateTime)
}

// ---------------------------------------------------------------------------
// Relationships
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub from: EntityKind,
    pub rel_type: &'static str,
    pub to: EntityKind,
}

pub const RELATIONSHIPS: &[Relationship] = &[
    Relationship {
        from: EntityKind::Jingle,
        rel_type: "APPEARS_IN",
        to: EntityKind::Fabrica,
    },
    Relationship {
        from: EntityKind::Jingle,
        rel_type: "VERSIONA",
        to: EntityKind::Cancion,
    },
    Relationship {
        from: EntityKind::Artista,
        rel_type: "JINGLERO_DE",
        to: EntityKind::Jingle,
    },
    Relationship {
        from: EntityKind::Artista,
        rel_type: "AUTOR_DE",
        to: EntityKind::Cancion,
    },
    Relationship {
        from: EntityKind::Jingle,
        rel_type: "TAGGED_WITH",
        to: EntityKind::Tematica,
    },
];

impl Relationship {
    /// Look up a relationship by type, case-insensitively.
    pub fn find(rel_type: &str) -> Option<&'static Relationship> {
        RELATIONSHIPS
            .iter()
            .find(|r| r.rel_type.eq_ignore_ascii_case(rel_type))
    }

    /// Batch statement linking existing nodes; `$rows` items carry `from` and `to` IDs.
    pub fn merge_statement(&self) -> String {
        format!(
            "UNWIND $rows AS row MATCH (a:{} {{id: row.from}}), (b:{} {{id: row.to}}) MERGE (a)-[:{}]->(b)",
            self.from.label(),
            self.to.label(),
            self.rel_type
        )
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({})-[:{}]->({})",
            self.from.label(),
            self.rel_type,
            self.to.label()
        )
    }
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// Constraint and index statements for the whole graph.
///
/// Constraints come first, then indexes; within each group kinds follow
/// [`EntityKind::ALL`] and properties their declaration order. Every
/// statement is idempotent (`IF NOT EXISTS`).
pub fn schema_statements() -> Vec<String> {
    let mut constraints = Vec::new();
    let mut indexes = Vec::new();

    for kind in EntityKind::ALL {
        let label = kind.label();
        let name = kind.to_string();
        for p in properties(kind) {
            let snake = snake_case(p.name);
            if p.unique {
                constraints.push(format!(
                    "CREATE CONSTRAINT {name}_{snake}_unique IF NOT EXISTS FOR (n:{label}) REQUIRE n.{} IS UNIQUE",
                    p.name
                ));
            } else if p.required {
                constraints.push(format!(
                    "CREATE CONSTRAINT {name}_{snake}_exists IF NOT EXISTS FOR (n:{label}) REQUIRE n.{} IS NOT NULL",
                    p.name
                ));
            }
            if p.indexed {
                indexes.push(format!(
                    "CREATE INDEX {name}_{snake} IF NOT EXISTS FOR (n:{label}) ON (n.{})",
                    p.name
                ));
            }
        }
    }

    constraints.extend(indexes);
    constraints
}

/// Batch upsert keyed on `id`; `$rows` is [`crate::ImportReport::batch`].
pub fn merge_statement(kind: EntityKind) -> String {
    format!(
        "UNWIND $rows AS row MERGE (n:{} {{id: row.id}}) SET n += row",
        kind.label()
    )
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
