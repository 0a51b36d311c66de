use atlas_graph::{EdgeKind, GraphAssembler, GraphOptions};
use atlas_model::{ResourceRef, ResourceType};
use atlas_store::InventorySnapshot;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

const SNAPSHOT: &str = r#"{
    "records": [
        {"resource_type": "organization", "id": 1, "name": "acme"},
        {"resource_type": "organization", "id": 2, "name": "acme-eu", "parent_id": 1},
        {"resource_type": "entity", "id": 3, "name": "edge-router", "organization_id": 1},
        {"resource_type": "entity", "id": 4, "name": "dns"}
    ],
    "dependencies": [
        {
            "source": {"resource_type": "entity", "resource_id": 3},
            "target": {"resource_type": "entity", "resource_id": 4}
        }
    ],
    "prefixes": [
        {"id": 1, "prefix": "10.0.0.0/8"},
        {"id": 2, "prefix": "10.1.0.0/16", "parent_id": 1}
    ]
}"#;

#[test]
fn loads_saves_and_reloads_identically() {
    let dir = tempdir().unwrap();
    let source_path = dir.path().join("inventory.json");
    fs::write(&source_path, SNAPSHOT).unwrap();

    let snapshot = InventorySnapshot::from_path(&source_path).unwrap();
    assert_eq!(snapshot.len(), 4);

    let copy_path = dir.path().join("copy.json");
    snapshot.save(&copy_path).unwrap();
    let reloaded = InventorySnapshot::from_path(&copy_path).unwrap();

    assert_eq!(reloaded.records(), snapshot.records());
    assert_eq!(reloaded.prefixes(), snapshot.prefixes());
    assert_eq!(reloaded.summary(), snapshot.summary());
}

#[test]
fn assembles_the_org_neighborhood_from_a_snapshot() {
    let snapshot = InventorySnapshot::from_json(SNAPSHOT).unwrap();
    let assembler = GraphAssembler::new(&snapshot);
    let opts = GraphOptions {
        max_hops: 2,
        max_nodes: 50,
        ..GraphOptions::default()
    };
    let root = ResourceRef::new(ResourceType::Organization, 1);

    let graph = assembler.build(&root, &opts).unwrap();

    let keys: Vec<&str> = graph.nodes.iter().map(|n| n.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["organization:1", "organization:2", "entity:3", "entity:4"]
    );

    let kinds: Vec<(&str, &str, EdgeKind)> = graph
        .edges
        .iter()
        .map(|e| (e.from.as_str(), e.to.as_str(), e.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("organization:1", "organization:2", EdgeKind::Hierarchical),
            ("organization:1", "entity:3", EdgeKind::Containment),
            ("entity:3", "entity:4", EdgeKind::Dependency),
        ]
    );
    assert!(!graph.stats.truncated);
}

#[test]
fn labels_follow_record_names() {
    let snapshot = InventorySnapshot::from_json(SNAPSHOT).unwrap();
    let assembler = GraphAssembler::new(&snapshot);
    let root = ResourceRef::new(ResourceType::Organization, 1);
    let graph = assembler.build(&root, &GraphOptions::default()).unwrap();

    let router = graph.nodes.iter().find(|n| n.key == "entity:3").unwrap();
    assert_eq!(router.label, "edge-router");
    assert_eq!(router.meta.organization_id, Some(1));
}
