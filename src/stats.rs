//! 路径长度统计
//!
//! 用于比较同样设备量下 fat-tree 与 Jellyfish 的服务器间最短跳数。

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::graph::NodeId;
use crate::topo::Topology;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathStats {
    /// 参与统计的有序服务器对数（不含自身）
    pub pairs: usize,
    /// 不可达的服务器对数
    pub unreachable: usize,
    /// 可达服务器对的平均跳数
    pub mean_hops: f64,
    /// 可达服务器对的最大跳数
    pub max_hops: u32,
    /// `histogram[h]` = 最短跳数为 h 的服务器对数
    pub histogram: Vec<usize>,
}

impl PathStats {
    /// 对每台服务器做一次 BFS，统计到其它服务器的最短跳数
    pub fn between_servers(topo: &Topology) -> Self {
        let adj = topo.graph().adjacency();
        let servers = topo.servers();
        let mut stats = PathStats::default();
        let mut total: u64 = 0;

        let mut dist = vec![u32::MAX; adj.len()];
        let mut q: VecDeque<NodeId> = VecDeque::new();
        for &src in servers {
            dist.fill(u32::MAX);
            dist[src.0] = 0;
            q.push_back(src);
            while let Some(v) = q.pop_front() {
                for &nbr in &adj[v.0] {
                    if dist[nbr.0] == u32::MAX {
                        dist[nbr.0] = dist[v.0] + 1;
                        q.push_back(nbr);
                    }
                }
            }

            for &dst in servers {
                if dst == src {
                    continue;
                }
                stats.pairs += 1;
                let d = dist[dst.0];
                if d == u32::MAX {
                    stats.unreachable += 1;
                    continue;
                }
                let h = d as usize;
                if stats.histogram.len() <= h {
                    stats.histogram.resize(h + 1, 0);
                }
                stats.histogram[h] += 1;
                stats.max_hops = stats.max_hops.max(d);
                total += u64::from(d);
            }
        }

        let reachable = stats.pairs - stats.unreachable;
        if reachable > 0 {
            stats.mean_hops = total as f64 / reachable as f64;
        }
        stats
    }
}
