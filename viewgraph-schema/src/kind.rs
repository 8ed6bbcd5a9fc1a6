use crate::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use viewgraph_model::ScalarValue;

/// Largest int magnitude a `float` field holds without rounding (2^53).
pub const MAX_EXACT_FLOAT_INT: u64 = 1 << 53;

/// The kind of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    /// Accepts integers up to 2^53 in magnitude; they are widened and render
    /// with a fraction.
    Float,
    Text,
    List,
    Map,
    /// Any scalar, including null.
    Any,
}

impl ScalarKind {
    /// Whether a runtime value satisfies this kind. `Null` only satisfies `Any`;
    /// nullability is a property of the field, not the kind.
    #[must_use]
    pub fn accepts(self, value: &ScalarValue) -> bool {
        matches!(
            (self, value),
            (Self::Any, _)
                | (Self::Bool, ScalarValue::Bool(_))
                | (Self::Int, ScalarValue::Int(_))
                | (Self::Float, ScalarValue::Float(_) | ScalarValue::Int(_))
                | (Self::Text, ScalarValue::Text(_))
                | (Self::List, ScalarValue::List(_))
                | (Self::Map, ScalarValue::Map(_))
        )
    }

    /// Widens an int for a `float` field. `None` when the magnitude exceeds
    /// [`MAX_EXACT_FLOAT_INT`], where `f64` would round it.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn widen_exact(value: i64) -> Option<f64> {
        (value.unsigned_abs() <= MAX_EXACT_FLOAT_INT).then(|| value as f64)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::List => "list",
            Self::Map => "map",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The declared kind of a projection field.
///
/// Written as a string in schema documents: a scalar kind name (`"text"`,
/// `"float"`, ...), `"view:Name"` for one nested projection, or
/// `"list:Name"` for a list of nested projections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldKind {
    Scalar(ScalarKind),
    /// One related entity rendered as the named projection type.
    View(String),
    /// Many related entities, each rendered as the named projection type.
    ViewList(String),
}

impl FieldKind {
    /// The projection type this kind expands into, if any.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Scalar(_) => None,
            Self::View(name) | Self::ViewList(name) => Some(name),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(k) => write!(f, "{k}"),
            Self::View(name) => write!(f, "view:{name}"),
            Self::ViewList(name) => write!(f, "list:{name}"),
        }
    }
}

impl FromStr for FieldKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let nested = |name: &str| {
            if name.is_empty() {
                Err(SchemaError::InvalidKind(s.to_string()))
            } else {
                Ok(name.to_string())
            }
        };
        if let Some(name) = s.strip_prefix("view:") {
            return nested(name).map(Self::View);
        }
        if let Some(name) = s.strip_prefix("list:") {
            return nested(name).map(Self::ViewList);
        }
        let kind = match s {
            "bool" => ScalarKind::Bool,
            "int" => ScalarKind::Int,
            "float" => ScalarKind::Float,
            "text" => ScalarKind::Text,
            "list" => ScalarKind::List,
            "map" => ScalarKind::Map,
            "any" => ScalarKind::Any,
            _ => return Err(SchemaError::InvalidKind(s.to_string())),
        };
        Ok(Self::Scalar(kind))
    }
}

impl TryFrom<String> for FieldKind {
    type Error = SchemaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.to_string()
    }
}

/// One `(name, kind)` entry of a projection type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub kind: FieldKind,
    /// Value used when the entity has no field of this name. Scalar kinds only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ScalarValue>,
    /// Whether `null` (or a missing value) is acceptable. Scalar kinds only;
    /// nested projections are always absent-able.
    #[serde(default)]
    pub nullable: bool,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            nullable: false,
        }
    }

    fn scalar(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self::new(name, FieldKind::Scalar(kind))
    }

    pub fn bool(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarKind::Bool)
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarKind::Int)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarKind::Float)
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarKind::Text)
    }

    pub fn list(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarKind::List)
    }

    pub fn map(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarKind::Map)
    }

    pub fn any(name: impl Into<String>) -> Self {
        Self::scalar(name, ScalarKind::Any)
    }

    /// A field holding one related entity projected as `target`.
    pub fn view(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(name, FieldKind::View(target.into()))
    }

    /// A field holding related entities, each projected as `target`.
    pub fn view_list(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(name, FieldKind::ViewList(target.into()))
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<ScalarValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// A named, ordered list of field declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionType {
    pub name: String,
    pub fields: Vec<FieldDecl>,
}

impl ProjectionType {
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = FieldDecl>) -> Self {
        Self {
            name: name.into(),
            fields: fields.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}
