//! Entity graph for viewgraph.
//!
//! Defines the in-memory domain objects that projections are built from:
//! - [`Entity`]: a typed bag of named scalar fields and named relations
//! - [`ScalarValue`]: the scalar payload of a field (text, numbers, mappings, ...)
//! - [`Relation`]: a relation slot that is absent (not loaded) or points at other entities
//! - [`EntityGraph`]: an arena owning entities; relations refer to [`EntityHandle`]s,
//!   so back-references (child → parent) are ordinary edges and may form cycles
//!
//! The persistence layer that decides which relations get loaded lives outside
//! this crate. [`EntityGraph::from_json`] exists for fixtures and tooling.

mod document;
mod entity;
mod graph;
mod value;

pub use document::{EntityDocument, EntityRecord, LoadedGraph, RelationRef};
pub use entity::{Entity, FieldRef, Relation};
pub use graph::{EntityGraph, EntityHandle};
pub use value::ScalarValue;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while building or loading an entity graph.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unknown entity handle: {0}")]
    UnknownHandle(EntityHandle),

    #[error("duplicate entity key in document: {0}")]
    DuplicateKey(String),

    #[error("entity '{from}' relation '{relation}' references unknown key '{key}'")]
    UnknownKey {
        from: String,
        relation: String,
        key: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
