//! 最短路（含 ECMP）支持
//!
//! 拓扑是无向、等权的，因此“按最短跳数”的路由表就足够：为每个 (from, dst)
//! 预计算所有等价最短路径的下一跳集合，路径选择时再用稳定哈希挑一个。

use std::collections::{HashMap, VecDeque};

use super::id::NodeId;
use crate::topo::Topology;

#[derive(Debug, Default, Clone)]
pub struct RoutingTable {
    /// (from, dst) -> 多个等价最短路径下一跳
    next_hops: HashMap<(NodeId, NodeId), Vec<NodeId>>,
    /// (from, dst) -> 最短跳数
    hops: HashMap<(NodeId, NodeId), u32>,
    /// 用于 ECMP hashing 的盐（保证稳定且可控）
    hash_salt: u64,
}

impl RoutingTable {
    pub fn new(hash_salt: u64) -> Self {
        Self {
            hash_salt,
            ..Self::default()
        }
    }

    /// 基于拓扑的无向邻接关系构建路由表
    pub fn build(topo: &Topology, hash_salt: u64) -> Self {
        let mut rt = Self::new(hash_salt);
        rt.build_from_adj(&topo.graph().adjacency());
        rt
    }

    /// `adj[v]` 为 v 的所有邻居（无向图，因此不需要反向邻接表）。
    pub fn build_from_adj(&mut self, adj: &[Vec<NodeId>]) {
        let n = adj.len();
        self.next_hops.clear();
        self.hops.clear();

        // 对每个 dst 做 BFS 得到 dist[*]，
        // 然后对每个 from 选出所有满足 dist[next] = dist[from] - 1 的 next 作为 ECMP 候选。
        let mut dist: Vec<u32> = vec![u32::MAX; n];
        let mut q: VecDeque<NodeId> = VecDeque::new();

        for dst_idx in 0..n {
            dist.fill(u32::MAX);
            q.clear();

            let dst = NodeId(dst_idx);
            dist[dst_idx] = 0;
            q.push_back(dst);

            while let Some(v) = q.pop_front() {
                let dv = dist[v.0];
                for &nbr in &adj[v.0] {
                    if dist[nbr.0] == u32::MAX {
                        dist[nbr.0] = dv + 1;
                        q.push_back(nbr);
                    }
                }
            }

            for from_idx in 0..n {
                let from = NodeId(from_idx);
                let df = dist[from_idx];
                if from == dst || df == u32::MAX {
                    continue;
                }
                let mut cands: Vec<NodeId> = adj[from_idx]
                    .iter()
                    .copied()
                    .filter(|nh| dist[nh.0] == df - 1)
                    .collect();
                cands.sort();
                cands.dedup();
                self.hops.insert((from, dst), df);
                self.next_hops.insert((from, dst), cands);
            }
        }
    }

    /// 获取 (from, dst) 的 ECMP 下一跳候选集合。
    pub fn next_hops(&self, from: NodeId, dst: NodeId) -> Option<&[NodeId]> {
        self.next_hops.get(&(from, dst)).map(|v| v.as_slice())
    }

    /// 最短跳数；from == dst 时为 0，不可达时为 None。
    pub fn hop_count(&self, from: NodeId, dst: NodeId) -> Option<u32> {
        if from == dst {
            return Some(0);
        }
        self.hops.get(&(from, dst)).copied()
    }

    /// 基于任意 key 的稳定 ECMP 选择。
    pub fn pick_ecmp_with_key(
        &self,
        from: NodeId,
        dst: NodeId,
        key: u64,
        cands: &[NodeId],
    ) -> NodeId {
        debug_assert!(!cands.is_empty());
        let h = mix64(
            key ^ (from.0 as u64).wrapping_mul(0x9E3779B97F4A7C15)
                ^ (dst.0 as u64)
                ^ self.hash_salt,
        );
        let idx = (h as usize) % cands.len();
        cands[idx]
    }

    /// 沿 ECMP 下一跳走出一条完整路径（含首尾）；不可达时返回 None。
    pub fn path(&self, src: NodeId, dst: NodeId, key: u64) -> Option<Vec<NodeId>> {
        let mut path = vec![src];
        let mut cur = src;
        while cur != dst {
            let cands = self.next_hops(cur, dst)?;
            cur = self.pick_ecmp_with_key(cur, dst, key, cands);
            path.push(cur);
        }
        Some(path)
    }
}

/// 一个简单、确定性的 64-bit mixing（替代 RandomState，避免每次运行 hash 不稳定）。
fn mix64(mut x: u64) -> u64 {
    // splitmix64
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
