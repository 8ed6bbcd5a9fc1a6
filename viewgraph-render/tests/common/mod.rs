//! Shared fixtures: the village/health pair whose entities reference each other.

#![allow(dead_code)]

use viewgraph_model::{Entity, EntityGraph, EntityHandle, ScalarValue};
use viewgraph_schema::{FieldDecl, FrozenRegistry, RenderConfig, SchemaRegistry};

pub const VILLAGE_ID: &str = "1101012001";

pub fn village_schema(config: RenderConfig) -> FrozenRegistry {
    let mut r = SchemaRegistry::with_config(config);
    r.register(
        "HealthBase",
        [FieldDecl::text("village_id"), FieldDecl::int("doctors")],
    )
    .register("FacilityBase", [FieldDecl::text("name"), FieldDecl::int("beds")])
    .register(
        "VillageMicro",
        [
            FieldDecl::text("id"),
            FieldDecl::text("name"),
            FieldDecl::text("district"),
            FieldDecl::float("latitude").with_default(0.0),
            FieldDecl::float("longitude").with_default(0.0),
            FieldDecl::map("demographics"),
            FieldDecl::map("stats"),
            FieldDecl::map("analytics"),
            FieldDecl::view("health", "HealthBase"),
        ],
    )
    .register(
        "VillageSummary",
        [
            FieldDecl::text("id"),
            FieldDecl::text("name"),
            FieldDecl::view_list("facilities", "FacilityBase"),
        ],
    );
    r.freeze().unwrap()
}

pub struct VillageFixture {
    pub graph: EntityGraph,
    pub village: EntityHandle,
    pub health: EntityHandle,
}

/// Village ⇄ Health with the back-reference populated.
pub fn cyclic_village() -> VillageFixture {
    let mut graph = EntityGraph::new();
    let village = graph.insert(
        Entity::new("Village")
            .with("id", VILLAGE_ID)
            .with("name", "Test Village")
            .with("district", "Test District")
            .with("demographics", ScalarValue::empty_map())
            .with("stats", ScalarValue::empty_map())
            .with("analytics", ScalarValue::empty_map()),
    );
    let health = graph.insert(
        Entity::new("Health")
            .with("village_id", VILLAGE_ID)
            .with("doctors", 5),
    );
    graph.link(village, "health", health).unwrap();
    graph.link(health, "village", village).unwrap();
    VillageFixture {
        graph,
        village,
        health,
    }
}

pub const VILLAGE_MICRO_JSON: &str = concat!(
    r#"{"id":"1101012001","name":"Test Village","district":"Test District","#,
    r#""latitude":0.0,"longitude":0.0,"demographics":{},"stats":{},"analytics":{},"#,
    r#""health":{"village_id":"1101012001","doctors":5}}"#
);
