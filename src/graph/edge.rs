//! 边类型
//!
//! 无向边：两个端点各自的邻接表持有同一个 `EdgeId`。

use super::id::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub(crate) a: Option<NodeId>,
    pub(crate) b: Option<NodeId>,
}

impl Edge {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        Self {
            a: Some(a),
            b: Some(b),
        }
    }

    /// 两个端点；边被 `Graph::remove` 作废后返回 None
    pub fn endpoints(&self) -> Option<(NodeId, NodeId)> {
        self.a.zip(self.b)
    }

    pub fn is_live(&self) -> bool {
        self.endpoints().is_some()
    }

    /// 从 `from` 看过去的另一端
    pub fn opposite(&self, from: NodeId) -> Option<NodeId> {
        let (a, b) = self.endpoints()?;
        if a == from {
            Some(b)
        } else if b == from {
            Some(a)
        } else {
            None
        }
    }

    pub(crate) fn invalidate(&mut self) {
        self.a = None;
        self.b = None;
    }
}
