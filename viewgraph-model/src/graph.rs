use crate::{Entity, ModelError, Relation, Result};
use std::fmt;

/// Graph-local handle to an entity inside an [`EntityGraph`].
///
/// Handles are plain indices: cheap to copy, and only meaningful for the
/// graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(usize);

impl EntityHandle {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arena that owns entities and the relations between them.
///
/// Relations are stored as handles, so a child pointing back at its parent
/// is an ordinary edge. Nothing here walks relations recursively.
#[derive(Debug, Clone, Default)]
pub struct EntityGraph {
    entities: Vec<Entity>,
}

impl EntityGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity and returns its handle.
    pub fn insert(&mut self, entity: Entity) -> EntityHandle {
        self.entities.push(entity);
        EntityHandle(self.entities.len() - 1)
    }

    #[must_use]
    pub fn get(&self, handle: EntityHandle) -> Option<&Entity> {
        self.entities.get(handle.0)
    }

    /// Like [`get`](Self::get), but reports unknown handles as an error.
    pub fn entity(&self, handle: EntityHandle) -> Result<&Entity> {
        self.get(handle).ok_or(ModelError::UnknownHandle(handle))
    }

    pub fn entity_mut(&mut self, handle: EntityHandle) -> Result<&mut Entity> {
        self.entities
            .get_mut(handle.0)
            .ok_or(ModelError::UnknownHandle(handle))
    }

    /// Populates `from.name` with a single related entity.
    pub fn link(&mut self, from: EntityHandle, name: &str, to: EntityHandle) -> Result<()> {
        self.check(to)?;
        self.entity_mut(from)?.set_relation(name, Relation::One(to));
        Ok(())
    }

    /// Populates `from.name` with related entities, keeping the given order.
    pub fn link_many(
        &mut self,
        from: EntityHandle,
        name: &str,
        to: impl IntoIterator<Item = EntityHandle>,
    ) -> Result<()> {
        let targets: Vec<EntityHandle> = to.into_iter().collect();
        for t in &targets {
            self.check(*t)?;
        }
        self.entity_mut(from)?.set_relation(name, Relation::Many(targets));
        Ok(())
    }

    /// Marks `from.name` as declared but not loaded.
    pub fn unlink(&mut self, from: EntityHandle, name: &str) -> Result<()> {
        self.entity_mut(from)?.set_relation(name, Relation::Absent);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Handles of every entity, in insertion order.
    pub fn handles(&self) -> impl Iterator<Item = EntityHandle> {
        (0..self.entities.len()).map(EntityHandle)
    }

    fn check(&self, handle: EntityHandle) -> Result<()> {
        self.entity(handle).map(|_| ())
    }
}
