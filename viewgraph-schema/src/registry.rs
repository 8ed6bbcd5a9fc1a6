use crate::cycle::{depths, find_cycle};
use crate::{
    FieldDecl, FieldKind, ProjectionType, RenderConfig, Result, ScalarKind, SchemaCycleError,
    SchemaError,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};
use viewgraph_model::ScalarValue;

/// Pending projection types, collected at startup.
///
/// Nothing can be rendered against a `SchemaRegistry`; call
/// [`freeze`](Self::freeze) to validate it and obtain a [`FrozenRegistry`].
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    pending: Vec<ProjectionType>,
    config: RenderConfig,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            pending: Vec::new(),
            config,
        }
    }

    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    /// Queues a projection type. Validation is deferred to [`freeze`](Self::freeze).
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        fields: impl IntoIterator<Item = FieldDecl>,
    ) -> &mut Self {
        self.register_type(ProjectionType::new(type_name, fields))
    }

    pub fn register_type(&mut self, projection: ProjectionType) -> &mut Self {
        debug!(type_name = %projection.name, fields = projection.fields.len(), "projection type registered");
        self.pending.push(projection);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Validates every pending type and, on success, returns the immutable
    /// registry.
    ///
    /// Each check is a full pass over every type, run in this order: duplicate
    /// type names, duplicate field names, unknown nested types, defaults that
    /// do not fit their field, then cycles in the field-expansion graph. The
    /// first failing pass decides the error. Any failure consumes the registry.
    pub fn freeze(self) -> Result<FrozenRegistry> {
        match self.validate() {
            Ok(frozen) => {
                info!(
                    types = frozen.types.len(),
                    max_depth = frozen.depths.iter().copied().max().unwrap_or(0),
                    "projection registry frozen"
                );
                Ok(frozen)
            }
            Err(e) => {
                warn!(error = %e, "projection registry rejected");
                Err(e)
            }
        }
    }

    fn validate(self) -> Result<FrozenRegistry> {
        let mut index = HashMap::with_capacity(self.pending.len());
        for (i, t) in self.pending.iter().enumerate() {
            if index.insert(t.name.clone(), i).is_some() {
                return Err(SchemaError::DuplicateType(t.name.clone()));
            }
        }

        for t in &self.pending {
            let mut seen = HashSet::with_capacity(t.fields.len());
            for field in &t.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(SchemaError::DuplicateField {
                        type_name: t.name.clone(),
                        field: field.name.clone(),
                    });
                }
            }
        }

        let edges = self
            .pending
            .iter()
            .map(|t| expansion_edges(t, &index))
            .collect::<Result<Vec<_>>>()?;

        for t in &self.pending {
            for field in &t.fields {
                check_default(t, field)?;
            }
        }

        if let Some(cycle) = find_cycle(&edges) {
            let cycle_path: Vec<String> = cycle
                .iter()
                .map(|&i| self.pending[i].name.clone())
                .collect();
            return Err(SchemaCycleError {
                type_name: cycle_path[0].clone(),
                cycle_path,
            }
            .into());
        }

        let depths = depths(&edges);
        Ok(FrozenRegistry {
            types: self.pending,
            index,
            edges,
            depths,
            config: self.config,
        })
    }
}

fn expansion_edges(t: &ProjectionType, index: &HashMap<String, usize>) -> Result<Vec<usize>> {
    t.fields
        .iter()
        .filter_map(|field| field.kind.target().map(|target| (field, target)))
        .map(|(field, target)| {
            index
                .get(target)
                .copied()
                .ok_or_else(|| SchemaError::UnknownType {
                    type_name: t.name.clone(),
                    field: field.name.clone(),
                    target: target.to_string(),
                })
        })
        .collect()
}

fn check_default(t: &ProjectionType, field: &FieldDecl) -> Result<()> {
    let invalid = |reason: String| SchemaError::InvalidDefault {
        type_name: t.name.clone(),
        field: field.name.clone(),
        reason,
    };
    match (&field.kind, &field.default) {
        (_, None) => Ok(()),
        (FieldKind::Scalar(_), Some(v)) if v.is_null() && field.nullable => Ok(()),
        (FieldKind::Scalar(ScalarKind::Float), Some(ScalarValue::Int(i)))
            if ScalarKind::widen_exact(*i).is_none() =>
        {
            Err(invalid(format!("int {i} has no exact float representation")))
        }
        (FieldKind::Scalar(kind), Some(v)) if kind.accepts(v) => {
            match v.find_non_finite() {
                Some((path, f)) => Err(invalid(format!("non-finite value {f} at '{path}'"))),
                None => Ok(()),
            }
        }
        (FieldKind::Scalar(kind), Some(v)) => Err(invalid(format!(
            "expected {kind}, found {}",
            v.kind_name()
        ))),
        (nested, Some(_)) => Err(invalid(format!("{nested} fields cannot have a default"))),
    }
}

/// Validated, immutable projection types.
///
/// Lookups take `&self` and never mutate, so a `FrozenRegistry` can be shared
/// (e.g. behind an `Arc`) across any number of threads without locking.
#[derive(Debug, Clone)]
pub struct FrozenRegistry {
    types: Vec<ProjectionType>,
    index: HashMap<String, usize>,
    edges: Vec<Vec<usize>>,
    depths: Vec<usize>,
    config: RenderConfig,
}

impl FrozenRegistry {
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&ProjectionType> {
        self.index.get(type_name).map(|&i| &self.types[i])
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.index.contains_key(type_name)
    }

    /// Type names in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.name.as_str())
    }

    /// Types that `type_name` directly expands into, in field order. A type
    /// used by several fields is listed once per field.
    #[must_use]
    pub fn edges(&self, type_name: &str) -> Option<Vec<&str>> {
        let &i = self.index.get(type_name)?;
        Some(
            self.edges[i]
                .iter()
                .map(|&j| self.types[j].name.as_str())
                .collect(),
        )
    }

    /// Longest chain of nested projections starting at `type_name`, counting
    /// the type itself. This bounds the nesting of anything rendered as it.
    #[must_use]
    pub fn depth(&self, type_name: &str) -> Option<usize> {
        self.index.get(type_name).map(|&i| self.depths[i])
    }

    #[must_use]
    pub fn config(&self) -> RenderConfig {
        self.config
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
