use crate::graph::NodeRole;
use crate::topo::fat_tree::FatTreeOpts;
use crate::topo::jellyfish::{JellyfishOpts, JellyfishPhase};
use crate::topo::{BuildEvent, NoopObserver, TopologyKind, build_fat_tree, build_jellyfish_with};
use crate::viz::{self, Snapshot};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

#[test]
fn snapshot_of_fat_tree_lists_nodes_links_and_labels() {
    let topo = build_fat_tree(&FatTreeOpts { k: 4 }, &mut NoopObserver).unwrap();
    let snap = Snapshot::from_topology(&topo);

    assert_eq!(snap.kind, TopologyKind::FatTree);
    assert_eq!(snap.port_count, 4);
    assert_eq!(snap.nodes.len(), 36);
    assert_eq!(snap.links.len(), 48);
    assert!(snap.mesh.is_none());

    let s16 = snap.nodes.iter().find(|n| n.name == "s16").unwrap();
    assert_eq!(s16.role, NodeRole::CoreSwitch);
    assert_eq!(s16.label.as_deref(), Some("10.4.1.1"));
    assert!(snap.links.iter().any(|l| l.a == "s0" && l.b == "h0"));

    let v: Value = serde_json::to_value(&snap).unwrap();
    assert_eq!(v["kind"], "fat_tree");
    assert!(v.get("mesh").is_none());
    assert_eq!(v["nodes"][0]["role"], "edge_switch");
}

#[test]
fn snapshot_of_jellyfish_carries_mesh_report_without_labels() {
    let opts = JellyfishOpts::matching_fat_tree(4);
    let mut rng = StdRng::seed_from_u64(2);
    let topo = build_jellyfish_with(&opts, &mut rng, &mut NoopObserver).unwrap();
    let snap = Snapshot::from_topology(&topo);

    assert_eq!(snap.kind, TopologyKind::Jellyfish);
    assert_eq!(snap.nodes.len(), 36);
    assert_eq!(snap.mesh.as_ref(), topo.mesh_report());

    let v: Value = serde_json::to_value(&snap).unwrap();
    assert!(v["nodes"][0].get("label").is_none());
    assert!(v["mesh"]["unresolved_ports"].is_u64());

    let back: Snapshot = serde_json::from_value(v).unwrap();
    assert_eq!(back, snap);
}

#[test]
fn dot_output_groups_fat_tree_layers() {
    let topo = build_fat_tree(&FatTreeOpts { k: 4 }, &mut NoopObserver).unwrap();
    let dot = viz::to_dot(&topo);

    assert!(dot.starts_with("graph fat_tree {\n"));
    assert!(dot.ends_with("}\n"));
    assert!(dot.contains("\"s0\" -- \"h0\";"));
    assert!(dot.contains("\"s16\" [label=\"s16\\n10.4.1.1\", shape=doubleoctagon];"));
    assert_eq!(dot.matches("rank=same").count(), 4);
    assert_eq!(dot.matches(" -- ").count(), 48);

    let jf = build_jellyfish_with(
        &JellyfishOpts::new(4, 4, 3),
        &mut StdRng::seed_from_u64(0),
        &mut NoopObserver,
    )
    .unwrap();
    let dot = viz::to_dot(&jf);
    assert!(dot.starts_with("graph jellyfish {\n"));
    assert_eq!(dot.matches("rank=same").count(), 0);
    assert!(dot.contains("\"h0\" [label=\"h0\", shape=ellipse];"));
}

#[test]
fn write_json_and_dot_to_disk() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("dctopo-rs-viz-{}-{nanos}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let topo = build_fat_tree(&FatTreeOpts { k: 2 }, &mut NoopObserver).unwrap();
    viz::write_json(&topo, dir.join("ft.json")).unwrap();
    viz::write_dot(&topo, dir.join("ft.dot")).unwrap();

    let raw = fs::read_to_string(dir.join("ft.json")).unwrap();
    let snap: Snapshot = serde_json::from_str(&raw).unwrap();
    assert_eq!(snap, Snapshot::from_topology(&topo));
    assert_eq!(fs::read_to_string(dir.join("ft.dot")).unwrap(), viz::to_dot(&topo));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn build_events_serialize_with_kind_tag() {
    let ev = BuildEvent::PhaseEntered {
        phase: JellyfishPhase::MeshingSwitches,
    };
    let v = serde_json::to_value(&ev).unwrap();
    assert_eq!(v, serde_json::json!({ "kind": "phase_entered", "phase": "meshing_switches" }));

    let ev = BuildEvent::RetryCeilingHit {
        retries: 5,
        free_ports: 3,
    };
    let back: BuildEvent = serde_json::from_str(&serde_json::to_string(&ev).unwrap()).unwrap();
    assert_eq!(back, ev);
}
