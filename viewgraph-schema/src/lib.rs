//! Projection schema registry for viewgraph.
//!
//! A projection type is a named, ordered list of field declarations used only
//! for external representation. Field kinds are either scalar kinds or the
//! name of another projection type, which makes the set of types a directed
//! "field-expansion" graph.
//!
//! - [`SchemaRegistry`]: the pending, mutable form; collects [`ProjectionType`]s
//! - [`FrozenRegistry`]: the validated, immutable form returned by
//!   [`SchemaRegistry::freeze`]; the only form the renderer accepts
//! - [`SchemaDocument`]: TOML/JSON declaration of a schema set
//!
//! Freezing rejects any cycle in the field-expansion graph, including a type
//! that names itself, so everything built from a frozen registry has a
//! statically bounded depth.

mod config;
mod cycle;
mod document;
mod kind;
mod registry;

pub use config::{AbsentPolicy, RenderConfig};
pub use document::{SchemaDocument, TypeRecord};
pub use kind::{FieldDecl, FieldKind, MAX_EXACT_FLOAT_INT, ProjectionType, ScalarKind};
pub use registry::{FrozenRegistry, SchemaRegistry};

use std::fmt;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// A loop in the field-expansion graph.
///
/// `cycle_path` lists the types on the loop starting at `type_name`, without
/// repeating it at the end: a self-referencing `X` reports `["X"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCycleError {
    pub type_name: String,
    pub cycle_path: Vec<String>,
}

impl fmt::Display for SchemaCycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projection type '{}' expands into itself: {} -> {}",
            self.type_name,
            self.cycle_path.join(" -> "),
            self.type_name
        )
    }
}

impl std::error::Error for SchemaCycleError {}

/// Errors raised while declaring or freezing projection types.
///
/// Every variant returned by [`SchemaRegistry::freeze`] is fatal: the
/// registry never becomes usable.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("schema cycle: {0}")]
    Cycle(#[from] SchemaCycleError),

    #[error("projection type '{0}' is registered more than once")]
    DuplicateType(String),

    #[error("projection type '{type_name}' declares field '{field}' more than once")]
    DuplicateField { type_name: String, field: String },

    #[error("projection type '{type_name}' field '{field}' refers to unknown type '{target}'")]
    UnknownType {
        type_name: String,
        field: String,
        target: String,
    },

    #[error("projection type '{type_name}' field '{field}' has invalid default: {reason}")]
    InvalidDefault {
        type_name: String,
        field: String,
        reason: String,
    },

    #[error("invalid field kind: {0}")]
    InvalidKind(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
