//! Graphviz DOT 输出

use std::fmt::Write;

use crate::graph::NodeRole;
use crate::topo::{Topology, TopologyKind};

fn shape(role: NodeRole) -> &'static str {
    match role {
        NodeRole::Host => "ellipse",
        NodeRole::EdgeSwitch => "box",
        NodeRole::AggregationSwitch => "box3d",
        NodeRole::CoreSwitch => "doubleoctagon",
    }
}

/// 渲染为无向图；fat-tree 的同层节点放在同一 rank
pub fn to_dot(topo: &Topology) -> String {
    let mut out = String::new();
    let name = match topo.kind() {
        TopologyKind::FatTree => "fat_tree",
        TopologyKind::Jellyfish => "jellyfish",
    };
    let _ = writeln!(out, "graph {name} {{");
    for node in topo.graph().nodes() {
        let label = match node.label() {
            Some(addr) => format!("{}\\n{}", node.name(), addr),
            None => node.name().to_string(),
        };
        let _ = writeln!(
            out,
            "  {:?} [label=\"{}\", shape={}];",
            node.name(),
            label,
            shape(node.role())
        );
    }
    for role in [
        NodeRole::CoreSwitch,
        NodeRole::AggregationSwitch,
        NodeRole::EdgeSwitch,
        NodeRole::Host,
    ] {
        let ids = topo.nodes_by_role(role);
        if ids.is_empty() || topo.core_switches().is_empty() {
            continue;
        }
        let names: Vec<String> = ids
            .iter()
            .map(|id| format!("{:?}", topo.node(*id).name()))
            .collect();
        let _ = writeln!(out, "  {{ rank=same; {}; }}", names.join("; "));
    }
    for (a, b) in topo.edge_names() {
        let _ = writeln!(out, "  {a:?} -- {b:?};");
    }
    out.push_str("}\n");
    out
}
