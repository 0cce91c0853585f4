//! 图结构
//!
//! 节点与边的 arena：节点按插入顺序编号，边对象在被移除后保留为作废状态，
//! 因而 `EdgeId` 在整个图生命周期内都不会被复用。

use std::collections::HashMap;

use super::edge::Edge;
use super::id::{EdgeId, NodeId};
use super::node::{Node, NodeRole};
use crate::error::{Result, TopoError};
use tracing::trace;

#[derive(Debug, Default, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    by_name: HashMap<String, NodeId>,
}

impl Graph {
    /// 添加节点；名称需唯一，重复名称会被后来者覆盖查找表
    pub fn add_node(&mut self, name: impl Into<String>, role: NodeRole) -> NodeId {
        let id = NodeId(self.nodes.len());
        let node = Node::new(id, name, role);
        self.by_name.insert(node.name().to_string(), id);
        self.nodes.push(node);
        id
    }

    /// 创建连接 `owner` 与 `other` 的边，并追加到两端的邻接表。
    ///
    /// 不做任何度数检查，端口预算由调用方负责。
    pub fn add_edge(&mut self, owner: NodeId, other: NodeId) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(owner, other));
        self.nodes[owner.0].edges.push(id);
        self.nodes[other.0].edges.push(id);
        trace!(edge = %id, owner = %owner, other = %other, "添加边");
        id
    }

    fn position(&self, owner: NodeId, edge: EdgeId) -> Result<usize> {
        let node = self
            .nodes
            .get(owner.0)
            .ok_or_else(|| TopoError::not_found("node", owner))?;
        node.edges
            .iter()
            .position(|e| *e == edge)
            .ok_or_else(|| TopoError::not_found("edge", format!("{edge} on {owner}")))
    }

    /// 只从 `owner` 的邻接表中移除 `edge`，另一端保持不变。
    ///
    /// 需要完全拆除时使用 [`Graph::remove`]。
    pub fn remove_edge(&mut self, owner: NodeId, edge: EdgeId) -> Result<()> {
        let pos = self.position(owner, edge)?;
        self.nodes[owner.0].edges.remove(pos);
        Ok(())
    }

    /// 把边从两个端点上拆下并作废，返回原来的两个端点。
    ///
    /// 任一端已不再持有该边时返回 `NotFound`，图保持不变。
    pub fn remove(&mut self, edge: EdgeId) -> Result<(NodeId, NodeId)> {
        let (a, b) = self
            .edges
            .get(edge.0)
            .and_then(Edge::endpoints)
            .ok_or_else(|| TopoError::not_found("edge", edge))?;
        self.position(a, edge)?;
        self.position(b, edge)?;

        self.remove_edge(a, edge)?;
        self.remove_edge(b, edge)?;
        self.edges[edge.0].invalidate();
        trace!(edge = %edge, a = %a, b = %b, "移除边");
        Ok((a, b))
    }

    /// `owner` 的某条边的另一端是否为 `other`
    pub fn is_neighbor(&self, owner: NodeId, other: NodeId) -> bool {
        self.nodes[owner.0]
            .edges
            .iter()
            .any(|e| self.edges[e.0].opposite(owner) == Some(other))
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 按名称查找节点
    pub fn find(&self, name: &str) -> Result<NodeId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| TopoError::not_found("node", name))
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.nodes[id.0].edges.len()
    }

    /// 邻居序列（按邻接表顺序，平行边会重复出现）
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0]
            .edges
            .iter()
            .filter_map(move |e| self.edges[e.0].opposite(id))
    }

    /// 仍然有效的边及其端点
    pub fn live_edges(&self) -> impl Iterator<Item = (EdgeId, NodeId, NodeId)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(idx, e)| e.endpoints().map(|(a, b)| (EdgeId(idx), a, b)))
    }

    /// 无向邻接表（下标即 `NodeId.0`），供最短路计算使用
    pub fn adjacency(&self) -> Vec<Vec<NodeId>> {
        (0..self.nodes.len())
            .map(|idx| self.neighbors(NodeId(idx)).collect())
            .collect()
    }
}
