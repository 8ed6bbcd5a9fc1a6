use crate::{EntityHandle, ScalarValue};
use std::collections::BTreeMap;

/// A relation slot on an entity.
///
/// The persistence layer decides what gets loaded; an unloaded relation is
/// [`Relation::Absent`], which is distinct from the entity not declaring the
/// relation at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    /// Declared but not loaded.
    Absent,
    /// A single related entity (one-to-one or many-to-one).
    One(EntityHandle),
    /// Related entities in load order (one-to-many).
    Many(Vec<EntityHandle>),
}

impl Relation {
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// A borrowed view of one named field of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRef<'a> {
    Scalar(&'a ScalarValue),
    Relation(&'a Relation),
}

/// A domain object with named scalar fields and named relations.
///
/// A name is either a scalar or a relation, never both: setting one removes
/// the other.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entity {
    pub entity_type: String,
    scalars: BTreeMap<String, ScalarValue>,
    relations: BTreeMap<String, Relation>,
}

impl Entity {
    /// Creates an entity of the given type with no fields.
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            scalars: BTreeMap::new(),
            relations: BTreeMap::new(),
        }
    }

    /// Builder-style [`set_scalar`](Self::set_scalar).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        self.set_scalar(name, value);
        self
    }

    /// Builder-style declaration of an unloaded relation.
    #[must_use]
    pub fn with_absent(mut self, name: impl Into<String>) -> Self {
        self.set_relation(name, Relation::Absent);
        self
    }

    pub fn set_scalar(&mut self, name: impl Into<String>, value: impl Into<ScalarValue>) {
        let name = name.into();
        self.relations.remove(&name);
        self.scalars.insert(name, value.into());
    }

    pub fn set_relation(&mut self, name: impl Into<String>, relation: Relation) {
        let name = name.into();
        self.scalars.remove(&name);
        self.relations.insert(name, relation);
    }

    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<&ScalarValue> {
        self.scalars.get(name)
    }

    #[must_use]
    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.get(name)
    }

    /// Looks a field up by name, whichever kind it is.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        if let Some(v) = self.scalars.get(name) {
            return Some(FieldRef::Scalar(v));
        }
        self.relations.get(name).map(FieldRef::Relation)
    }

    pub fn scalars(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.scalars.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn relations(&self) -> impl Iterator<Item = (&str, &Relation)> {
        self.relations.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Total number of named fields (scalars plus relations).
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.scalars.len() + self.relations.len()
    }
}
