use crate::TopoError;
use crate::config::TopologyConfig;
use crate::topo::{NoopObserver, TopologyKind};
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

#[test]
fn config_parses_fat_tree_and_builds_it() {
    let cfg = TopologyConfig::from_json_str(r#"{ "kind": "fat_tree", "k": 4 }"#).unwrap();
    assert_eq!(cfg, TopologyConfig::FatTree { k: 4 });

    let topo = cfg.build(&mut NoopObserver).unwrap();
    assert_eq!(topo.kind(), TopologyKind::FatTree);
    assert_eq!(topo.graph().node_count(), 36);
}

#[test]
fn config_jellyfish_optional_fields_default_to_none() {
    let cfg = TopologyConfig::from_json_str(
        r#"{ "kind": "jellyfish", "num_servers": 16, "num_switches": 20, "num_ports": 4 }"#,
    )
    .unwrap();
    assert_eq!(
        cfg,
        TopologyConfig::Jellyfish {
            num_servers: 16,
            num_switches: 20,
            num_ports: 4,
            seed: None,
            retry_limit: None,
        }
    );
}

#[test]
fn config_seeded_jellyfish_is_reproducible() {
    let raw = r#"{
        "kind": "jellyfish",
        "num_servers": 54, "num_switches": 45, "num_ports": 6,
        "seed": 11
    }"#;
    let cfg = TopologyConfig::from_json_str(raw).unwrap();
    let a = cfg.build(&mut NoopObserver).unwrap();
    let b = cfg.build(&mut NoopObserver).unwrap();
    assert_eq!(a.edge_names(), b.edge_names());
}

#[test]
fn config_negative_counts_are_invalid_parameters() {
    let cases = [
        (r#"{ "kind": "fat_tree", "k": -4 }"#, "k"),
        (
            r#"{ "kind": "jellyfish", "num_servers": -1, "num_switches": 4, "num_ports": 4 }"#,
            "num_servers",
        ),
        (
            r#"{ "kind": "jellyfish", "num_servers": 4, "num_switches": 4, "num_ports": -2 }"#,
            "num_ports",
        ),
        (
            r#"{
                "kind": "jellyfish",
                "num_servers": 4, "num_switches": 4, "num_ports": 4,
                "retry_limit": -5
            }"#,
            "retry_limit",
        ),
    ];
    for (raw, field) in cases {
        let cfg = TopologyConfig::from_json_str(raw).unwrap();
        let err = cfg.build(&mut NoopObserver).unwrap_err();
        assert!(
            matches!(err, TopoError::InvalidParameter { name, .. } if name == field),
            "{raw}: {err}"
        );
    }
}

#[test]
fn config_rejects_unknown_kind_and_missing_file() {
    let err = TopologyConfig::from_json_str(r#"{ "kind": "torus", "k": 4 }"#).unwrap_err();
    assert!(matches!(err, TopoError::Config(_)), "{err}");

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("dctopo-rs-config-{}-{nanos}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let err = TopologyConfig::from_path(dir.join("missing.json")).unwrap_err();
    assert!(matches!(err, TopoError::Io(_)), "{err}");

    let path = dir.join("ft.json");
    fs::write(&path, r#"{ "kind": "fat_tree", "k": 6 }"#).unwrap();
    assert_eq!(TopologyConfig::from_path(&path).unwrap(), TopologyConfig::FatTree { k: 6 });

    let _ = fs::remove_dir_all(&dir);
}
