//! Fat-tree 拓扑构建
//!
//! 分配顺序固定为 edge → aggregation → core → 主机：交换机按该顺序命名为
//! `s0, s1, ...`，主机命名为 `h0, h1, ...`。连线规则：
//!
//! - 每台 edge 交换机按顺序接入接下来的 k/2 台主机；
//! - 每台 aggregation 交换机连接本 pod 的 k/2 台 edge 交换机；
//! - 第 i 台 aggregation 交换机从 core 列表的 `(i * k/2) mod core_count` 处向后
//!   连接 k/2 台 core 交换机，不回绕，到列表末尾即停止。

use tracing::{debug, info};

use super::address;
use super::observer::{BuildEvent, BuildObserver, ObservedGraph};
use super::{Layout, Topology};
use crate::error::{Result, TopoError};
use crate::graph::{EdgeSet, NodeId, NodeRole};

#[derive(Debug, Clone)]
pub struct FatTreeOpts {
    pub k: usize,
}

impl Default for FatTreeOpts {
    fn default() -> Self {
        Self { k: 4 }
    }
}

/// 检查端口数 k：必须为偶数且不小于 2
pub fn validate_port_count(k: usize) -> Result<()> {
    if k < 2 {
        return Err(TopoError::invalid("k", format!("port count must be >= 2, got {k}")));
    }
    if k % 2 != 0 {
        return Err(TopoError::invalid("k", format!("port count must be even, got {k}")));
    }
    Ok(())
}

/// 各层规模
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FatTreeSizes {
    pub core: usize,
    pub aggregation: usize,
    pub edge: usize,
    pub hosts: usize,
}

impl FatTreeSizes {
    pub fn for_k(k: usize) -> Self {
        let half = k / 2;
        Self {
            core: half * half,
            aggregation: k * half,
            edge: k * half,
            hosts: k * half * half,
        }
    }

    pub fn switches(&self) -> usize {
        self.core + self.aggregation + self.edge
    }
}

#[tracing::instrument(skip(opts, observer), fields(k = opts.k))]
pub fn build_fat_tree(opts: &FatTreeOpts, observer: &mut dyn BuildObserver) -> Result<Topology> {
    let k = opts.k;
    validate_port_count(k)?;

    let half = k / 2;
    let sizes = FatTreeSizes::for_k(k);
    info!(
        core = sizes.core,
        aggregation = sizes.aggregation,
        edge = sizes.edge,
        hosts = sizes.hosts,
        switches = sizes.switches(),
        "🌲 构建 fat-tree"
    );

    let mut g = ObservedGraph::new(observer);
    let mut next_switch = 0usize;
    let mut switch_name = || {
        let name = format!("s{next_switch}");
        next_switch += 1;
        name
    };

    let mut edge_switches = Vec::with_capacity(sizes.edge);
    for idx in 0..sizes.edge {
        let (pod, slot) = (idx / half, idx % half);
        let label = address::edge_switch(pod, slot);
        edge_switches.push(g.add_node(switch_name(), NodeRole::EdgeSwitch, Some(label)));
    }

    // aggregation 的槽位编号从 k/2 开始，与 edge 交换机错开
    let mut agg_switches = Vec::with_capacity(sizes.aggregation);
    for idx in 0..sizes.aggregation {
        let (pod, slot) = (idx / half, idx % half);
        let label = address::aggregation_switch(pod, half + slot);
        agg_switches.push(g.add_node(switch_name(), NodeRole::AggregationSwitch, Some(label)));
    }

    let mut core_switches = Vec::with_capacity(sizes.core);
    for idx in 0..sizes.core {
        let (stripe, index) = (idx / half, idx % half);
        let label = address::core_switch(k, stripe, index);
        core_switches.push(g.add_node(switch_name(), NodeRole::CoreSwitch, Some(label)));
    }

    let mut hosts = Vec::with_capacity(sizes.hosts);
    for idx in 0..sizes.hosts {
        let pod = idx / (half * half);
        let edge_slot = (idx / half) % half;
        let label = address::host(pod, edge_slot, idx % half);
        hosts.push(g.add_node(format!("h{idx}"), NodeRole::Host, Some(label)));
    }
    debug!(nodes = g.graph().node_count(), "节点分配完成");

    let mut edge_set = EdgeSet::default();
    let mut unassigned = hosts.iter().copied();
    for &edge in &edge_switches {
        for host in unassigned.by_ref().take(half) {
            link(&mut g, &mut edge_set, edge, host);
        }
    }

    let core_count = core_switches.len();
    for (idx, &agg) in agg_switches.iter().enumerate() {
        let pod = idx / half;
        for &edge in &edge_switches[pod * half..(pod + 1) * half] {
            link(&mut g, &mut edge_set, agg, edge);
        }

        let offset = (idx * half) % core_count;
        for &core in core_switches.iter().skip(offset).take(half) {
            link(&mut g, &mut edge_set, agg, core);
        }
    }

    let graph_edges = g.graph().live_edges().count();
    g.emit(BuildEvent::Finished {
        nodes: g.graph().node_count(),
        edges: edge_set.len(),
        unresolved_ports: 0,
    });
    info!(edges = edge_set.len(), "✅ fat-tree 构建完成");
    debug_assert_eq!(graph_edges, edge_set.len());

    Ok(Topology {
        layout: Layout::FatTree { k },
        graph: g.into_graph(),
        servers: hosts,
        edge_switches,
        agg_switches,
        core_switches,
        edge_set,
    })
}

fn link(g: &mut ObservedGraph<'_>, edge_set: &mut EdgeSet, owner: NodeId, other: NodeId) {
    g.add_edge(owner, other);
    edge_set.insert(owner, other);
}
