use viewgraph_model::ScalarValue;

/// One field value of a [`ProjectionInstance`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectedValue {
    Scalar(ScalarValue),
    Nested(ProjectionInstance),
    List(Vec<ProjectionInstance>),
    /// Unloaded relation or missing nullable scalar.
    Absent,
}

impl ProjectedValue {
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            Self::Scalar(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_nested(&self) -> Option<&ProjectionInstance> {
        match self {
            Self::Nested(p) => Some(p),
            _ => None,
        }
    }
}

/// An acyclic tree of values shaped by a projection type.
///
/// Holds exactly the projection type's fields, in declaration order, and no
/// link back to the entity it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionInstance {
    pub type_name: String,
    pub fields: Vec<(String, ProjectedValue)>,
}

impl ProjectionInstance {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProjectedValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Nesting depth of this tree, counting itself.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .fields
            .iter()
            .map(|(_, v)| match v {
                ProjectedValue::Nested(p) => p.depth(),
                ProjectedValue::List(items) => items.iter().map(Self::depth).max().unwrap_or(0),
                ProjectedValue::Scalar(_) | ProjectedValue::Absent => 0,
            })
            .max()
            .unwrap_or(0)
    }
}
