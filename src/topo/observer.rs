//! 构建过程观察者
//!
//! 构建算法本身只产出数据；节点分配、加边、重试触顶等过程事件通过
//! [`BuildObserver`] 交给调用方，默认实现把它们转成 tracing 日志。

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::jellyfish::JellyfishPhase;
use crate::error::Result;
use crate::graph::{EdgeId, Graph, NodeId, NodeRole};

/// 构建事件（JSON 形式与 `kind` 标签一起序列化）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildEvent {
    /// 分配了一个节点
    NodeAllocated {
        node: usize,
        name: String,
        role: NodeRole,
    },
    /// 添加了一条边
    EdgeAdded { edge: usize, a: usize, b: usize },
    /// 一条边被拆除（Jellyfish 修补阶段）
    EdgeRemoved { edge: usize, a: usize, b: usize },
    /// Jellyfish 状态机进入新阶段
    PhaseEntered { phase: JellyfishPhase },
    /// 随机连线连续重复达到上限
    RetryCeilingHit { retries: usize, free_ports: usize },
    /// 修补阶段的一次 2 换 1 重连：`switch` 接入原先的 `a`--`b` 链路两端
    Rewired { switch: usize, a: usize, b: usize },
    /// 构建结束
    Finished {
        nodes: usize,
        edges: usize,
        unresolved_ports: usize,
    },
}

/// 构建事件接收者
pub trait BuildObserver {
    fn on_event(&mut self, ev: &BuildEvent);
}

/// 丢弃所有事件
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl BuildObserver for NoopObserver {
    fn on_event(&mut self, _ev: &BuildEvent) {}
}

/// 把事件写入 tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl BuildObserver for TracingObserver {
    fn on_event(&mut self, ev: &BuildEvent) {
        match ev {
            BuildEvent::NodeAllocated { node, name, role } => {
                trace!(node, name = %name, role = %role, "分配节点");
            }
            BuildEvent::EdgeAdded { edge, a, b } => trace!(edge, a, b, "🔗 添加边"),
            BuildEvent::EdgeRemoved { edge, a, b } => trace!(edge, a, b, "✂️  拆除边"),
            BuildEvent::PhaseEntered { phase } => debug!(?phase, "进入阶段"),
            BuildEvent::RetryCeilingHit { retries, free_ports } => {
                warn!(retries, free_ports, "随机连线达到重试上限，仍有空闲端口");
            }
            BuildEvent::Rewired { switch, a, b } => debug!(switch, a, b, "🔁 2 换 1 重连"),
            BuildEvent::Finished {
                nodes,
                edges,
                unresolved_ports,
            } => debug!(nodes, edges, unresolved_ports, "构建完成"),
        }
    }
}

/// 一个简单的事件收集器（存内存，结束后可写成 JSON）
#[derive(Debug, Default, Clone)]
pub struct BuildLog {
    pub events: Vec<BuildEvent>,
}

impl BuildLog {
    pub fn count(&self, pred: impl Fn(&BuildEvent) -> bool) -> usize {
        self.events.iter().filter(|ev| pred(ev)).count()
    }
}

impl BuildObserver for BuildLog {
    fn on_event(&mut self, ev: &BuildEvent) {
        self.events.push(ev.clone());
    }
}

/// 构建期间使用的图：每次修改都会通知观察者
pub(crate) struct ObservedGraph<'o> {
    graph: Graph,
    observer: &'o mut dyn BuildObserver,
}

impl<'o> ObservedGraph<'o> {
    pub(crate) fn new(observer: &'o mut dyn BuildObserver) -> Self {
        Self {
            graph: Graph::default(),
            observer,
        }
    }

    pub(crate) fn graph(&self) -> &Graph {
        &self.graph
    }

    pub(crate) fn emit(&mut self, ev: BuildEvent) {
        self.observer.on_event(&ev);
    }

    pub(crate) fn add_node(
        &mut self,
        name: String,
        role: NodeRole,
        label: Option<String>,
    ) -> NodeId {
        let id = self.graph.add_node(name.clone(), role);
        if let Some(label) = label {
            self.graph.node_mut(id).set_label(label);
        }
        self.emit(BuildEvent::NodeAllocated {
            node: id.0,
            name,
            role,
        });
        id
    }

    pub(crate) fn add_edge(&mut self, owner: NodeId, other: NodeId) -> EdgeId {
        let edge = self.graph.add_edge(owner, other);
        self.emit(BuildEvent::EdgeAdded {
            edge: edge.0,
            a: owner.0,
            b: other.0,
        });
        edge
    }

    pub(crate) fn remove(&mut self, edge: EdgeId) -> Result<()> {
        let (a, b) = self.graph.remove(edge)?;
        self.emit(BuildEvent::EdgeRemoved {
            edge: edge.0,
            a: a.0,
            b: b.0,
        });
        Ok(())
    }

    pub(crate) fn into_graph(self) -> Graph {
        self.graph
    }
}
