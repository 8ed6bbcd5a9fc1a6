//! Projection rendering for viewgraph.
//!
//! Two steps, both pure functions of their inputs and a [`FrozenRegistry`]:
//! - [`instantiate`] reads an entity (and whatever relations are loaded)
//!   through a projection type into a [`ProjectionInstance`] tree
//! - [`serialize`] writes that tree as canonical JSON, keys in declaration order
//!
//! Recursion follows the projection type's fields, never the entity's own
//! relations, so a cyclic entity graph cannot make either step loop: depth is
//! bounded by [`FrozenRegistry::depth`].

mod instance;
mod instantiate;
mod serialize;

pub use instance::{ProjectedValue, ProjectionInstance};
pub use instantiate::instantiate;
pub use serialize::{serialize, serialize_pretty, serialize_with};

use viewgraph_model::{EntityGraph, EntityHandle};
use viewgraph_schema::FrozenRegistry;

/// Per-call failure while reading an entity through a projection type.
///
/// Never affects the registry or other calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeMismatchError {
    #[error("unknown projection type '{0}'")]
    UnknownProjection(String),

    #[error("unknown entity handle {0}")]
    UnknownHandle(EntityHandle),

    #[error("{projection}.{field}: entity has no such field")]
    MissingField { projection: String, field: String },

    #[error("{projection}.{field}: expected {expected}, found {found}")]
    KindMismatch {
        projection: String,
        field: String,
        expected: String,
        found: String,
    },

    #[error("{projection}.{field}: int {value} has no exact float representation")]
    InexactFloat {
        projection: String,
        field: String,
        value: i64,
    },
}

/// Per-call failure while writing a projection instance.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error("non-finite number {value} at '{path}' has no canonical form")]
    NonFinite { path: String, value: f64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Either per-call failure, for callers using [`project`].
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Mismatch(#[from] TypeMismatchError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

/// Instantiates `handle` as `projection` and serializes the result.
pub fn project(
    registry: &FrozenRegistry,
    graph: &EntityGraph,
    handle: EntityHandle,
    projection: &str,
) -> Result<String, RenderError> {
    let instance = instantiate(registry, graph, handle, projection)?;
    Ok(serialize(registry, &instance)?)
}
