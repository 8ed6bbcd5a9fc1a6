//! Declarative schema sets, loaded from TOML or JSON.
//!
//! ```toml
//! [render]
//! absent = "null"
//!
//! [[types]]
//! name = "HealthBase"
//! fields = [
//!     { name = "village_id", kind = "text" },
//!     { name = "doctors", kind = "int" },
//! ]
//! ```

use crate::{FieldDecl, ProjectionType, RenderConfig, Result, SchemaRegistry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub types: Vec<TypeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRecord {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

impl SchemaDocument {
    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// A pending registry holding every type in document order.
    #[must_use]
    pub fn into_registry(self) -> SchemaRegistry {
        let mut registry = SchemaRegistry::with_config(self.render);
        for t in self.types {
            registry.register_type(ProjectionType::new(t.name, t.fields));
        }
        registry
    }
}
