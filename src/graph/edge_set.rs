//! 去重边集合
//!
//! 面向外部消费者（绘图、最短路输入）的 `(a, b)` 对。记录方向保持插入时的顺序，
//! 但 `(a, b)` 与 `(b, a)` 视为同一条无向边。

use std::collections::BTreeSet;

use super::id::NodeId;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EdgeSet {
    pairs: BTreeSet<(NodeId, NodeId)>,
}

impl EdgeSet {
    /// 插入一条边；已存在（任一方向）时返回 false
    pub fn insert(&mut self, a: NodeId, b: NodeId) -> bool {
        if self.contains(a, b) {
            return false;
        }
        self.pairs.insert((a, b))
    }

    pub fn contains(&self, a: NodeId, b: NodeId) -> bool {
        self.pairs.contains(&(a, b)) || self.pairs.contains(&(b, a))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.pairs.iter().copied()
    }
}

impl<'a> IntoIterator for &'a EdgeSet {
    type Item = (NodeId, NodeId);
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, (NodeId, NodeId)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter().copied()
    }
}
