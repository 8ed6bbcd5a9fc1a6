//! JSON fixture format for entity graphs.
//!
//! ```json
//! {"entities": [
//!   {"key": "v1", "type": "Village", "fields": {"id": "1101012001"}, "relations": {"health": "h1"}},
//!   {"key": "h1", "type": "Health", "fields": {"doctors": 5}, "relations": {"village": "v1"}}
//! ]}
//! ```
//!
//! Relation values are a key, a list of keys, or `null` for "not loaded".
//! Keys may point forward or back, so cycles load fine.

use crate::{Entity, EntityGraph, EntityHandle, ModelError, Result, ScalarValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDocument {
    pub entities: Vec<EntityRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Document-local key other records use to refer to this entity.
    pub key: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default)]
    pub fields: BTreeMap<String, ScalarValue>,
    #[serde(default)]
    pub relations: BTreeMap<String, Option<RelationRef>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationRef {
    One(String),
    Many(Vec<String>),
}

/// An entity graph loaded from a document, with its key → handle table.
#[derive(Debug, Clone, Default)]
pub struct LoadedGraph {
    pub graph: EntityGraph,
    pub keys: HashMap<String, EntityHandle>,
}

impl LoadedGraph {
    #[must_use]
    pub fn handle(&self, key: &str) -> Option<EntityHandle> {
        self.keys.get(key).copied()
    }
}

impl EntityGraph {
    /// Parses an [`EntityDocument`] from JSON and builds the graph.
    pub fn from_json(json: &str) -> Result<LoadedGraph> {
        let doc: EntityDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Builds a graph in two passes: insert every record, then resolve relations.
    pub fn from_document(doc: EntityDocument) -> Result<LoadedGraph> {
        let mut graph = EntityGraph::new();
        let mut keys = HashMap::with_capacity(doc.entities.len());

        for record in &doc.entities {
            if keys.contains_key(&record.key) {
                return Err(ModelError::DuplicateKey(record.key.clone()));
            }
            let mut entity = Entity::new(record.entity_type.clone());
            for (name, value) in &record.fields {
                entity.set_scalar(name.clone(), value.clone());
            }
            keys.insert(record.key.clone(), graph.insert(entity));
        }

        for record in doc.entities {
            let from = keys[&record.key];
            for (name, target) in record.relations {
                let resolve = |key: &str| {
                    keys.get(key).copied().ok_or_else(|| ModelError::UnknownKey {
                        from: record.key.clone(),
                        relation: name.clone(),
                        key: key.to_string(),
                    })
                };
                match target {
                    None => graph.unlink(from, &name)?,
                    Some(RelationRef::One(key)) => {
                        let to = resolve(key.as_str())?;
                        graph.link(from, &name, to)?;
                    }
                    Some(RelationRef::Many(list)) => {
                        let to = list
                            .iter()
                            .map(|k| resolve(k.as_str()))
                            .collect::<Result<Vec<_>>>()?;
                        graph.link_many(from, &name, to)?;
                    }
                }
            }
        }

        Ok(LoadedGraph { graph, keys })
    }
}
