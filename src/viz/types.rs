use serde::{Deserialize, Serialize};

use crate::graph::NodeRole;
use crate::topo::jellyfish::MeshReport;
use crate::topo::{Layout, Topology, TopologyKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VizNodeInfo {
    pub id: usize,
    pub name: String,
    pub role: NodeRole,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
}

/// 一条无向链路（按记录时的方向）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VizLinkInfo {
    pub a: String,
    pub b: String,
}

/// 拓扑快照：供绘图/最短路等外部工具使用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub kind: TopologyKind,
    pub port_count: usize,
    pub nodes: Vec<VizNodeInfo>,
    pub links: Vec<VizLinkInfo>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mesh: Option<MeshReport>,
}

impl Snapshot {
    pub fn from_topology(topo: &Topology) -> Self {
        let nodes = topo
            .graph()
            .nodes()
            .iter()
            .map(|n| VizNodeInfo {
                id: n.id().0,
                name: n.name().to_string(),
                role: n.role(),
                label: n.label().map(str::to_string),
            })
            .collect();
        let links = topo
            .edge_names()
            .into_iter()
            .map(|(a, b)| VizLinkInfo {
                a: a.to_string(),
                b: b.to_string(),
            })
            .collect();
        let mesh = match topo.layout() {
            Layout::Jellyfish { mesh, .. } => Some(mesh.clone()),
            Layout::FatTree { .. } => None,
        };
        Self {
            kind: topo.kind(),
            port_count: topo.port_count(),
            nodes,
            links,
            mesh,
        }
    }
}
