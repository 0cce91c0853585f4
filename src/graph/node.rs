//! 节点类型
//!
//! 定义拓扑节点及其角色（主机、edge/aggregation/core 交换机）。

use super::id::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 节点角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Host,
    EdgeSwitch,
    AggregationSwitch,
    CoreSwitch,
}

impl NodeRole {
    pub fn is_switch(self) -> bool {
        !matches!(self, NodeRole::Host)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeRole::Host => "host",
            NodeRole::EdgeSwitch => "edge-switch",
            NodeRole::AggregationSwitch => "aggregation-switch",
            NodeRole::CoreSwitch => "core-switch",
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 图节点
///
/// 相等性只看名称与角色，邻接表和地址标签不参与比较。
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,
    role: NodeRole,
    label: Option<String>,
    pub(crate) edges: Vec<EdgeId>,
}

impl Node {
    /// 创建新节点
    pub fn new(id: NodeId, name: impl Into<String>, role: NodeRole) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            label: None,
            edges: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> NodeRole {
        self.role
    }

    /// 人类可读的地址标签（仅用于诊断输出）
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub(crate) fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// 按插入顺序排列的关联边
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.role == other.role
    }
}

impl Eq for Node {}
