use pretty_assertions::assert_eq;
use viewgraph_model::ScalarValue;
use viewgraph_schema::{AbsentPolicy, FieldKind, ScalarKind, SchemaDocument, SchemaError};

const VILLAGE_TOML: &str = r#"
[render]
absent = "omit"

[[types]]
name = "HealthBase"
fields = [
    { name = "village_id", kind = "text" },
    { name = "doctors", kind = "int" },
]

[[types]]
name = "VillageMicro"
fields = [
    { name = "id", kind = "text" },
    { name = "latitude", kind = "float", default = 0.0 },
    { name = "note", kind = "text", nullable = true },
    { name = "health", kind = "view:HealthBase" },
]
"#;

#[test]
fn toml_document_loads_types_in_order() {
    let doc = SchemaDocument::from_toml(VILLAGE_TOML).unwrap();
    assert_eq!(doc.render.absent, AbsentPolicy::Omit);
    assert!(!doc.render.pretty);
    let names: Vec<&str> = doc.types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["HealthBase", "VillageMicro"]);

    let micro = &doc.types[1];
    assert_eq!(micro.fields[1].default, Some(ScalarValue::Float(0.0)));
    assert!(micro.fields[2].nullable);
    assert_eq!(micro.fields[3].kind, FieldKind::View("HealthBase".into()));
}

#[test]
fn toml_document_freezes() {
    let frozen = SchemaDocument::from_toml(VILLAGE_TOML)
        .unwrap()
        .into_registry()
        .freeze()
        .unwrap();
    assert_eq!(frozen.config().absent, AbsentPolicy::Omit);
    assert_eq!(frozen.depth("VillageMicro"), Some(2));
    assert_eq!(
        frozen.get("HealthBase").unwrap().field("doctors").unwrap().kind,
        FieldKind::Scalar(ScalarKind::Int)
    );
}

#[test]
fn json_document_loads() {
    let json = r#"{
        "types": [
            {"name": "Leaf", "fields": [{"name": "id", "kind": "text"}]},
            {"name": "Tree", "fields": [{"name": "leaves", "kind": "list:Leaf"}]}
        ]
    }"#;
    let doc = SchemaDocument::from_json(json).unwrap();
    assert_eq!(doc.render.absent, AbsentPolicy::Null);
    let frozen = doc.into_registry().freeze().unwrap();
    assert_eq!(frozen.edges("Tree"), Some(vec!["Leaf"]));
}

#[test]
fn invalid_kind_in_document_is_an_error() {
    let toml = r#"
[[types]]
name = "A"
fields = [{ name = "x", kind = "decimal" }]
"#;
    let err = SchemaDocument::from_toml(toml).unwrap_err();
    assert!(matches!(err, SchemaError::Toml(_)));
    assert!(err.to_string().contains("decimal"));
}

#[test]
fn cyclic_document_fails_at_freeze() {
    let toml = r#"
[[types]]
name = "Village"
fields = [{ name = "health", kind = "view:Health" }]

[[types]]
name = "Health"
fields = [{ name = "village", kind = "view:Village" }]
"#;
    let registry = SchemaDocument::from_toml(toml).unwrap().into_registry();
    assert!(matches!(registry.freeze(), Err(SchemaError::Cycle(_))));
}
