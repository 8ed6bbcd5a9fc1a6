use crate::{ProjectedValue, ProjectionInstance, SerializationError};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use viewgraph_model::ScalarValue;
use viewgraph_schema::{AbsentPolicy, FrozenRegistry, RenderConfig};

type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes `instance` using the registry's render settings.
///
/// Output is JSON with keys in declaration order. Integers render without a
/// fraction. Floats are written in plain decimal notation, never with an
/// exponent, and always with a fraction (`0.0`, `10000000000000000.0`).
/// Mapping keys are sorted. Identical inputs give byte-identical output.
pub fn serialize(registry: &FrozenRegistry, instance: &ProjectionInstance) -> Result<String> {
    serialize_with(&registry.config(), instance)
}

/// Like [`serialize`], but indented for reading regardless of the
/// registry's `pretty` setting. The absent policy still comes from the
/// registry.
pub fn serialize_pretty(
    registry: &FrozenRegistry,
    instance: &ProjectionInstance,
) -> Result<String> {
    let config = RenderConfig {
        pretty: true,
        ..registry.config()
    };
    serialize_with(&config, instance)
}

/// Serializes `instance` with explicit settings.
pub fn serialize_with(config: &RenderConfig, instance: &ProjectionInstance) -> Result<String> {
    check_finite(instance, "")?;
    let ordered = Ordered {
        instance,
        absent: config.absent,
    };
    let text = if config.pretty {
        serde_json::to_string_pretty(&ordered)?
    } else {
        serde_json::to_string(&ordered)?
    };
    Ok(text)
}

/// serde_json quietly writes NaN and infinities as `null`; reject them instead.
fn check_finite(instance: &ProjectionInstance, prefix: &str) -> Result<()> {
    for (name, value) in &instance.fields {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        match value {
            ProjectedValue::Scalar(v) => {
                if let Some((rest, value)) = v.find_non_finite() {
                    return Err(SerializationError::NonFinite {
                        path: format!("{path}{rest}"),
                        value,
                    });
                }
            }
            ProjectedValue::Nested(inner) => check_finite(inner, &path)?,
            ProjectedValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    check_finite(item, &format!("{path}[{i}]"))?;
                }
            }
            ProjectedValue::Absent => {}
        }
    }
    Ok(())
}

struct Ordered<'a> {
    instance: &'a ProjectionInstance,
    absent: AbsentPolicy,
}

struct OrderedList<'a> {
    items: &'a [ProjectionInstance],
    absent: AbsentPolicy,
}

impl Serialize for Ordered<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let omit = self.absent == AbsentPolicy::Omit;
        let emitted: Vec<&(String, ProjectedValue)> = self
            .instance
            .fields
            .iter()
            .filter(|(_, v)| !(omit && v.is_absent()))
            .collect();

        let mut map = serializer.serialize_map(Some(emitted.len()))?;
        for (name, value) in emitted {
            match value {
                ProjectedValue::Scalar(v) => map.serialize_entry(name, &Canonical(v))?,
                ProjectedValue::Nested(inner) => map.serialize_entry(
                    name,
                    &Ordered {
                        instance: inner,
                        absent: self.absent,
                    },
                )?,
                ProjectedValue::List(items) => map.serialize_entry(
                    name,
                    &OrderedList {
                        items,
                        absent: self.absent,
                    },
                )?,
                ProjectedValue::Absent => map.serialize_entry(name, &None::<()>)?,
            }
        }
        map.end()
    }
}

impl Serialize for OrderedList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for instance in self.items {
            seq.serialize_element(&Ordered {
                instance,
                absent: self.absent,
            })?;
        }
        seq.end()
    }
}

/// A scalar with floats in their canonical text.
struct Canonical<'a>(&'a ScalarValue);

impl Serialize for Canonical<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            ScalarValue::Float(f) => RawValue::from_string(canonical_float(*f))
                .map_err(S::Error::custom)?
                .serialize(serializer),
            ScalarValue::List(items) => serializer.collect_seq(items.iter().map(Canonical)),
            ScalarValue::Map(entries) => {
                serializer.collect_map(entries.iter().map(|(k, v)| (k, Canonical(v))))
            }
            other => other.serialize(serializer),
        }
    }
}

/// `f64`'s `Display` never uses an exponent and prints the shortest digits
/// that read back to the same value; only the `.0` may be missing.
fn canonical_float(f: f64) -> String {
    let mut text = f.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}
