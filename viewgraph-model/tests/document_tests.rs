use viewgraph_model::{EntityGraph, ModelError, Relation, ScalarValue};

const VILLAGE_DOC: &str = r#"{
  "entities": [
    {"key": "v1", "type": "Village",
     "fields": {"id": "1101012001", "name": "Test Village", "demographics": {}},
     "relations": {"health": "h1", "facilities": ["f1", "f2"], "digital": null}},
    {"key": "h1", "type": "Health",
     "fields": {"village_id": "1101012001", "doctors": 5},
     "relations": {"village": "v1"}},
    {"key": "f1", "type": "Facility", "fields": {"name": "Puskesmas"}},
    {"key": "f2", "type": "Facility", "fields": {"name": "Klinik"}}
  ]
}"#;

#[test]
fn loads_entities_and_keys() {
    let loaded = EntityGraph::from_json(VILLAGE_DOC).unwrap();
    assert_eq!(loaded.graph.len(), 4);
    let v = loaded.handle("v1").unwrap();
    let village = loaded.graph.entity(v).unwrap();
    assert_eq!(village.entity_type, "Village");
    assert_eq!(village.scalar("demographics"), Some(&ScalarValue::empty_map()));
}

#[test]
fn resolves_forward_and_back_references() {
    let loaded = EntityGraph::from_json(VILLAGE_DOC).unwrap();
    let v = loaded.handle("v1").unwrap();
    let h = loaded.handle("h1").unwrap();
    assert_eq!(loaded.graph.entity(v).unwrap().relation("health"), Some(&Relation::One(h)));
    assert_eq!(loaded.graph.entity(h).unwrap().relation("village"), Some(&Relation::One(v)));
}

#[test]
fn resolves_many_relations_in_order() {
    let loaded = EntityGraph::from_json(VILLAGE_DOC).unwrap();
    let v = loaded.handle("v1").unwrap();
    let f1 = loaded.handle("f1").unwrap();
    let f2 = loaded.handle("f2").unwrap();
    assert_eq!(
        loaded.graph.entity(v).unwrap().relation("facilities"),
        Some(&Relation::Many(vec![f1, f2]))
    );
}

#[test]
fn null_relation_is_absent() {
    let loaded = EntityGraph::from_json(VILLAGE_DOC).unwrap();
    let v = loaded.handle("v1").unwrap();
    assert_eq!(loaded.graph.entity(v).unwrap().relation("digital"), Some(&Relation::Absent));
}

#[test]
fn unknown_key_is_rejected() {
    let doc = r#"{"entities": [{"key": "v1", "type": "Village", "relations": {"health": "nope"}}]}"#;
    let err = EntityGraph::from_json(doc).unwrap_err();
    match err {
        ModelError::UnknownKey { from, relation, key } => {
            assert_eq!(from, "v1");
            assert_eq!(relation, "health");
            assert_eq!(key, "nope");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_key_is_rejected() {
    let doc = r#"{"entities": [{"key": "a", "type": "A"}, {"key": "a", "type": "B"}]}"#;
    assert!(matches!(
        EntityGraph::from_json(doc),
        Err(ModelError::DuplicateKey(k)) if k == "a"
    ));
}

#[test]
fn malformed_json_is_json_error() {
    let err = EntityGraph::from_json("{not json").unwrap_err();
    assert!(matches!(err, ModelError::Json(_)));
    assert!(err.to_string().contains("JSON error"));
}
