//! 拓扑构建
//!
//! 两个互相独立的生成器（fat-tree、Jellyfish）共享同一套图原语，
//! 构建结束后返回只读的 [`Topology`]。

pub mod address;
pub mod fat_tree;
pub mod jellyfish;
pub mod observer;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopoError};
use crate::graph::{EdgeSet, Graph, Node, NodeId, NodeRole};
use fat_tree::FatTreeOpts;
use jellyfish::{JellyfishOpts, MeshReport, MeshStop};
use observer::TracingObserver;

pub use fat_tree::build_fat_tree;
pub use jellyfish::{JellyfishBuilder, JellyfishPhase, build_jellyfish_with};
pub use observer::{BuildEvent, BuildLog, BuildObserver, NoopObserver};

/// 拓扑种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopologyKind {
    FatTree,
    Jellyfish,
}

/// 与拓扑种类相关的构建参数与结果
#[derive(Debug, Clone)]
pub enum Layout {
    FatTree { k: usize },
    Jellyfish { num_ports: usize, mesh: MeshReport },
}

/// 构建完成的拓扑（只读）
#[derive(Debug, Clone)]
pub struct Topology {
    layout: Layout,
    graph: Graph,
    servers: Vec<NodeId>,
    edge_switches: Vec<NodeId>,
    agg_switches: Vec<NodeId>,
    core_switches: Vec<NodeId>,
    edge_set: EdgeSet,
}

/// 按端口数 k 构建 fat-tree，构建事件写入 tracing。
pub fn build_fattree(port_count: usize) -> Result<Topology> {
    build_fat_tree(&FatTreeOpts { k: port_count }, &mut TracingObserver)
}

/// 用线程本地随机源构建 Jellyfish，构建事件写入 tracing。
pub fn build_jellyfish(
    num_servers: usize,
    num_switches: usize,
    num_ports: usize,
) -> Result<Topology> {
    let opts = JellyfishOpts::new(num_servers, num_switches, num_ports);
    build_jellyfish_with(&opts, &mut rand::thread_rng(), &mut TracingObserver)
}

impl Topology {
    pub fn kind(&self) -> TopologyKind {
        match self.layout {
            Layout::FatTree { .. } => TopologyKind::FatTree,
            Layout::Jellyfish { .. } => TopologyKind::Jellyfish,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// 每台交换机的端口数
    pub fn port_count(&self) -> usize {
        match self.layout {
            Layout::FatTree { k } => k,
            Layout::Jellyfish { num_ports, .. } => num_ports,
        }
    }

    pub fn servers(&self) -> &[NodeId] {
        &self.servers
    }

    pub fn edge_switches(&self) -> &[NodeId] {
        &self.edge_switches
    }

    pub fn aggregation_switches(&self) -> &[NodeId] {
        &self.agg_switches
    }

    pub fn core_switches(&self) -> &[NodeId] {
        &self.core_switches
    }

    /// 某一角色的全部节点（`Host` 即服务器）
    pub fn nodes_by_role(&self, role: NodeRole) -> &[NodeId] {
        match role {
            NodeRole::Host => &self.servers,
            NodeRole::EdgeSwitch => &self.edge_switches,
            NodeRole::AggregationSwitch => &self.agg_switches,
            NodeRole::CoreSwitch => &self.core_switches,
        }
    }

    /// 所有交换机，顺序为 edge、aggregation、core
    pub fn switches(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.edge_switches
            .iter()
            .chain(&self.agg_switches)
            .chain(&self.core_switches)
            .copied()
    }

    pub fn switch_count(&self) -> usize {
        self.edge_switches.len() + self.agg_switches.len() + self.core_switches.len()
    }

    /// 去重后的边集合
    pub fn edges(&self) -> &EdgeSet {
        &self.edge_set
    }

    /// 以节点名表示的边集合
    pub fn edge_names(&self) -> Vec<(&str, &str)> {
        self.edge_set
            .iter()
            .map(|(a, b)| (self.graph.node(a).name(), self.graph.node(b).name()))
            .collect()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.graph.node(id)
    }

    pub fn find(&self, name: &str) -> Result<NodeId> {
        self.graph.find(name)
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.graph.degree(id)
    }

    /// Jellyfish 构建后仍未用上的交换机端口总数；fat-tree 恒为 0
    pub fn unresolved_ports(&self) -> usize {
        match &self.layout {
            Layout::FatTree { .. } => 0,
            Layout::Jellyfish { mesh, .. } => mesh.unresolved_ports,
        }
    }

    pub fn mesh_report(&self) -> Option<&MeshReport> {
        match &self.layout {
            Layout::FatTree { .. } => None,
            Layout::Jellyfish { mesh, .. } => Some(mesh),
        }
    }

    /// 随机连线因重试上限停下且仍有空闲端口时返回 `ConstructionExhausted`。
    ///
    /// 这只是诊断：拓扑本身依然可用。
    pub fn ensure_fully_wired(&self) -> Result<()> {
        match self.mesh_report() {
            Some(mesh)
                if mesh.stop == Some(MeshStop::RetryCeiling) && mesh.unresolved_ports > 0 =>
            {
                Err(TopoError::ConstructionExhausted {
                    retries: mesh.retries,
                    free_ports: mesh.unresolved_ports,
                })
            }
            _ => Ok(()),
        }
    }

    fn fat_tree_half(&self) -> Option<usize> {
        match self.layout {
            Layout::FatTree { k } => Some(k / 2),
            Layout::Jellyfish { .. } => None,
        }
    }

    /// fat-tree 中第 `pod` 个 pod、第 `edge` 台 edge 交换机下的第 `host` 台主机
    pub fn host_at(&self, pod: usize, edge: usize, host: usize) -> Option<NodeId> {
        let half = self.fat_tree_half()?;
        if edge >= half || host >= half {
            return None;
        }
        self.servers.get((pod * half + edge) * half + host).copied()
    }

    pub fn edge_at(&self, pod: usize, slot: usize) -> Option<NodeId> {
        let half = self.fat_tree_half()?;
        if slot >= half {
            return None;
        }
        self.edge_switches.get(pod * half + slot).copied()
    }

    pub fn agg_at(&self, pod: usize, slot: usize) -> Option<NodeId> {
        let half = self.fat_tree_half()?;
        if slot >= half {
            return None;
        }
        self.agg_switches.get(pod * half + slot).copied()
    }

    /// 第 `stripe` 组 core 交换机中的第 `index` 台
    pub fn core_at(&self, stripe: usize, index: usize) -> Option<NodeId> {
        let half = self.fat_tree_half()?;
        if index >= half {
            return None;
        }
        self.core_switches.get(stripe * half + index).copied()
    }

    /// fat-tree 中交换机或主机所属的 pod；core 交换机与 Jellyfish 节点没有 pod
    pub fn pod_of(&self, id: NodeId) -> Option<usize> {
        let half = self.fat_tree_half()?;
        let pos = |list: &[NodeId]| list.iter().position(|n| *n == id);
        match self.node(id).role() {
            NodeRole::Host => pos(&self.servers).map(|i| i / (half * half)),
            NodeRole::EdgeSwitch => pos(&self.edge_switches).map(|i| i / half),
            NodeRole::AggregationSwitch => pos(&self.agg_switches).map(|i| i / half),
            NodeRole::CoreSwitch => None,
        }
    }
}
