use crate::{ProjectedValue, ProjectionInstance, TypeMismatchError};
use tracing::debug;
use viewgraph_model::{Entity, EntityGraph, EntityHandle, FieldRef, Relation, ScalarValue};
use viewgraph_schema::{FieldDecl, FieldKind, FrozenRegistry, ProjectionType, ScalarKind};

type Result<T> = std::result::Result<T, TypeMismatchError>;

/// Reads the entity at `handle` through the projection type `projection`.
///
/// Only the projection's declared fields are read; anything else on the
/// entity is ignored. Related entities are read through the nested type the
/// field declares, never through their own relations, so back-references on
/// them are not visited unless that nested type declares them.
pub fn instantiate(
    registry: &FrozenRegistry,
    graph: &EntityGraph,
    handle: EntityHandle,
    projection: &str,
) -> Result<ProjectionInstance> {
    debug!(projection, entity = %handle, "instantiating projection");
    Instantiator { registry, graph }.entity_as(handle, projection)
}

struct Instantiator<'a> {
    registry: &'a FrozenRegistry,
    graph: &'a EntityGraph,
}

impl Instantiator<'_> {
    fn entity_as(&self, handle: EntityHandle, projection: &str) -> Result<ProjectionInstance> {
        let schema = self
            .registry
            .get(projection)
            .ok_or_else(|| TypeMismatchError::UnknownProjection(projection.to_string()))?;
        let entity = self
            .graph
            .get(handle)
            .ok_or(TypeMismatchError::UnknownHandle(handle))?;

        let fields = schema
            .fields
            .iter()
            .map(|decl| Ok((decl.name.clone(), self.field(schema, decl, entity)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(ProjectionInstance {
            type_name: schema.name.clone(),
            fields,
        })
    }

    fn field(
        &self,
        schema: &ProjectionType,
        decl: &FieldDecl,
        entity: &Entity,
    ) -> Result<ProjectedValue> {
        let found = entity.field(&decl.name);
        match &decl.kind {
            FieldKind::Scalar(kind) => scalar(schema, decl, *kind, found),
            FieldKind::View(target) => match found {
                Some(FieldRef::Relation(Relation::One(h))) => {
                    Ok(ProjectedValue::Nested(self.entity_as(*h, target)?))
                }
                Some(FieldRef::Relation(Relation::Absent)) => Ok(ProjectedValue::Absent),
                Some(FieldRef::Scalar(ScalarValue::Null)) => Ok(ProjectedValue::Absent),
                Some(FieldRef::Relation(Relation::Many(_))) => {
                    Err(mismatch(schema, decl, "to-many relation"))
                }
                Some(FieldRef::Scalar(v)) => Err(mismatch(schema, decl, v.kind_name())),
                None => Err(missing(schema, decl)),
            },
            FieldKind::ViewList(target) => match found {
                Some(FieldRef::Relation(Relation::Many(handles))) => handles
                    .iter()
                    .map(|h| self.entity_as(*h, target))
                    .collect::<Result<Vec<_>>>()
                    .map(ProjectedValue::List),
                Some(FieldRef::Relation(Relation::Absent)) => Ok(ProjectedValue::Absent),
                Some(FieldRef::Scalar(ScalarValue::Null)) => Ok(ProjectedValue::Absent),
                Some(FieldRef::Relation(Relation::One(_))) => {
                    Err(mismatch(schema, decl, "to-one relation"))
                }
                Some(FieldRef::Scalar(v)) => Err(mismatch(schema, decl, v.kind_name())),
                None => Err(missing(schema, decl)),
            },
        }
    }
}

fn scalar(
    schema: &ProjectionType,
    decl: &FieldDecl,
    kind: ScalarKind,
    found: Option<FieldRef<'_>>,
) -> Result<ProjectedValue> {
    let value = match found {
        Some(FieldRef::Scalar(v)) => v,
        Some(FieldRef::Relation(_)) => return Err(mismatch(schema, decl, "relation")),
        None => match (&decl.default, decl.nullable) {
            (Some(default), _) => default,
            (None, true) => return Ok(ProjectedValue::Absent),
            (None, false) => return Err(missing(schema, decl)),
        },
    };

    // `any` copies null like any other value; elsewhere it means absent
    if value.is_null() && kind != ScalarKind::Any {
        return if decl.nullable {
            Ok(ProjectedValue::Absent)
        } else {
            Err(mismatch(schema, decl, "null"))
        };
    }
    if !kind.accepts(value) {
        return Err(mismatch(schema, decl, value.kind_name()));
    }

    let value = match (kind, value) {
        (ScalarKind::Float, ScalarValue::Int(i)) => match ScalarKind::widen_exact(*i) {
            Some(f) => ScalarValue::Float(f),
            None => {
                return Err(TypeMismatchError::InexactFloat {
                    projection: schema.name.clone(),
                    field: decl.name.clone(),
                    value: *i,
                });
            }
        },
        _ => value.clone(),
    };
    Ok(ProjectedValue::Scalar(value))
}

fn mismatch(schema: &ProjectionType, decl: &FieldDecl, found: &str) -> TypeMismatchError {
    TypeMismatchError::KindMismatch {
        projection: schema.name.clone(),
        field: decl.name.clone(),
        expected: decl.kind.to_string(),
        found: found.to_string(),
    }
}

fn missing(schema: &ProjectionType, decl: &FieldDecl) -> TypeMismatchError {
    TypeMismatchError::MissingField {
        projection: schema.name.clone(),
        field: decl.name.clone(),
    }
}
