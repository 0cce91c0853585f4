//! Jellyfish 拓扑构建
//!
//! 随机启发式，而不是精确的随机正则图生成器。构建过程是一个小状态机：
//!
//! ```text
//! AttachingHosts -> MeshingSwitches -> PatchingExhaustedPorts -> Done
//!                      ^        |
//!                      +--------+  (连续重复次数 < retry_limit)
//! ```
//!
//! 每个阶段都是 [`JellyfishBuilder`] 上的独立方法，共享同一张端口预算表。
//! 阶段方法只能在对应阶段调用，否则返回 [`TopoError::OutOfPhase`]。
//! 连线阶段可能留下少量空闲端口，这是启发式本身的特性，结果通过
//! [`MeshReport`] 暴露出来。

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::observer::{BuildEvent, BuildObserver, ObservedGraph};
use super::{Layout, Topology};
use crate::error::{Result, TopoError};
use crate::graph::{EdgeId, EdgeSet, NodeId, NodeRole};

/// 连续重复选中已连接交换机对的默认上限
pub const DEFAULT_RETRY_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct JellyfishOpts {
    pub num_servers: usize,
    pub num_switches: usize,
    pub num_ports: usize,
    pub retry_limit: usize,
}

impl JellyfishOpts {
    pub fn new(num_servers: usize, num_switches: usize, num_ports: usize) -> Self {
        Self {
            num_servers,
            num_switches,
            num_ports,
            retry_limit: DEFAULT_RETRY_LIMIT,
        }
    }

    /// 与端口数同为 k 的 fat-tree 设备量相同：k³/4 台服务器，5k²/4 台交换机
    pub fn matching_fat_tree(k: usize) -> Self {
        Self::new(k * k * k / 4, 5 * k * k / 4, k)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("num_servers", self.num_servers),
            ("num_switches", self.num_switches),
            ("num_ports", self.num_ports),
            ("retry_limit", self.retry_limit),
        ] {
            if value == 0 {
                return Err(TopoError::invalid(name, "must be positive"));
            }
        }
        let capacity = self.num_switches.saturating_mul(self.num_ports);
        if self.num_servers > capacity {
            return Err(TopoError::invalid(
                "num_servers",
                format!(
                    "{} servers do not fit on {} switches x {} ports",
                    self.num_servers, self.num_switches, self.num_ports
                ),
            ));
        }
        Ok(())
    }
}

/// 构建阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JellyfishPhase {
    AttachingHosts,
    MeshingSwitches,
    PatchingExhaustedPorts,
    Done,
}

/// 随机连线停止的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshStop {
    /// 有空闲端口的交换机不足两台
    FewFreeSwitches,
    /// 连续重复次数达到上限
    RetryCeiling,
}

/// 单次随机连线的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshStep {
    Linked(usize, usize),
    Duplicate(usize, usize),
    Stopped(MeshStop),
}

/// 连线结果摘要
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshReport {
    pub stop: Option<MeshStop>,
    /// 停止时的连续重复次数
    pub retries: usize,
    /// 交换机之间的链路数
    pub links: usize,
    /// 修补阶段的 2 换 1 重连次数
    pub rewires: usize,
    /// 最终仍空闲的交换机端口总数
    pub unresolved_ports: usize,
}

/// 每台交换机的剩余端口
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortBudget {
    free: Vec<usize>,
}

impl PortBudget {
    pub fn new(num_switches: usize, num_ports: usize) -> Self {
        Self {
            free: vec![num_ports; num_switches],
        }
    }

    pub fn free(&self, switch: usize) -> usize {
        self.free[switch]
    }

    fn take(&mut self, switch: usize, ports: usize) {
        debug_assert!(self.free[switch] >= ports, "port budget overdrawn on switch {switch}");
        self.free[switch] -= ports;
    }

    /// 仍有空闲端口的交换机下标（升序）
    pub fn with_free(&self) -> Vec<usize> {
        (0..self.free.len()).filter(|&s| self.free[s] > 0).collect()
    }

    pub fn total_free(&self) -> usize {
        self.free.iter().sum()
    }
}

/// 单次 Jellyfish 构建的全部可变状态
pub struct JellyfishBuilder<'a, R: Rng> {
    opts: JellyfishOpts,
    rng: &'a mut R,
    g: ObservedGraph<'a>,
    phase: JellyfishPhase,
    switches: Vec<NodeId>,
    servers: Vec<NodeId>,
    budget: PortBudget,
    /// (交换机下标, 服务器下标)
    host_links: Vec<(usize, usize)>,
    /// (较小下标, 较大下标) -> 图中的边
    links: BTreeMap<(usize, usize), EdgeId>,
    failures: usize,
    report: MeshReport,
}

impl<'a, R: Rng> JellyfishBuilder<'a, R> {
    /// 校验参数并分配全部节点：交换机 `s0..`，服务器 `h0..`
    pub fn new(
        opts: &JellyfishOpts,
        rng: &'a mut R,
        observer: &'a mut dyn BuildObserver,
    ) -> Result<Self> {
        opts.validate()?;

        let mut g = ObservedGraph::new(observer);
        let switches = (0..opts.num_switches)
            .map(|i| g.add_node(format!("s{i}"), NodeRole::EdgeSwitch, None))
            .collect();
        let servers = (0..opts.num_servers)
            .map(|i| g.add_node(format!("h{i}"), NodeRole::Host, None))
            .collect();
        g.emit(BuildEvent::PhaseEntered {
            phase: JellyfishPhase::AttachingHosts,
        });

        Ok(Self {
            opts: opts.clone(),
            rng,
            g,
            phase: JellyfishPhase::AttachingHosts,
            switches,
            servers,
            budget: PortBudget::new(opts.num_switches, opts.num_ports),
            host_links: Vec::new(),
            links: BTreeMap::new(),
            failures: 0,
            report: MeshReport::default(),
        })
    }

    pub fn phase(&self) -> JellyfishPhase {
        self.phase
    }

    pub fn budget(&self) -> &PortBudget {
        &self.budget
    }

    /// 当前交换机之间的链路（交换机下标，较小者在前）
    pub fn switch_links(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.links.keys().copied()
    }

    fn require(&self, step: &'static str, phase: JellyfishPhase) -> Result<()> {
        if self.phase != phase {
            return Err(TopoError::OutOfPhase {
                step,
                phase: self.phase,
            });
        }
        Ok(())
    }

    fn enter(&mut self, phase: JellyfishPhase) {
        debug!(from = ?self.phase, to = ?phase, "阶段切换");
        self.phase = phase;
        self.g.emit(BuildEvent::PhaseEntered { phase });
    }

    /// 执行当前阶段并返回新的阶段
    pub fn advance(&mut self) -> Result<JellyfishPhase> {
        match self.phase {
            JellyfishPhase::AttachingHosts => self.attach_hosts()?,
            JellyfishPhase::MeshingSwitches => {
                self.mesh_switches()?;
            }
            JellyfishPhase::PatchingExhaustedPorts => {
                self.patch_exhausted_ports()?;
            }
            JellyfishPhase::Done => {}
        }
        Ok(self.phase)
    }

    fn attach(&mut self, switch: usize, server: usize) {
        self.g.add_edge(self.switches[switch], self.servers[server]);
        self.budget.take(switch, 1);
        self.host_links.push((switch, server));
    }

    /// 接入主机：先把服务器 i 接到交换机 i，
    /// 多出来的服务器再轮询分配给仍有空闲端口的交换机。
    pub fn attach_hosts(&mut self) -> Result<()> {
        self.require("attach_hosts", JellyfishPhase::AttachingHosts)?;
        let n = self.switches.len();
        let base = n.min(self.servers.len());
        for i in 0..base {
            self.attach(i, i);
        }

        let mut cursor = 0;
        for server in base..self.servers.len() {
            let Some(switch) = (0..n)
                .map(|off| (cursor + off) % n)
                .find(|&s| self.budget.free(s) > 0)
            else {
                return Err(TopoError::invalid(
                    "num_servers",
                    format!("no free switch port left for server h{server}"),
                ));
            };
            self.attach(switch, server);
            cursor = (switch + 1) % n;
        }

        debug!(
            host_links = self.host_links.len(),
            free_ports = self.budget.total_free(),
            "主机接入完成"
        );
        self.enter(JellyfishPhase::MeshingSwitches);
        Ok(())
    }

    /// 随机连线的一步：在有空闲端口的交换机中均匀选出两台不同的交换机。
    pub fn mesh_step(&mut self) -> Result<MeshStep> {
        self.require("mesh_step", JellyfishPhase::MeshingSwitches)?;
        if self.failures >= self.opts.retry_limit {
            return Ok(MeshStep::Stopped(MeshStop::RetryCeiling));
        }
        let free = self.budget.with_free();
        if free.len() < 2 {
            return Ok(MeshStep::Stopped(MeshStop::FewFreeSwitches));
        }

        let i = self.rng.gen_range(0..free.len());
        let mut j = self.rng.gen_range(0..free.len() - 1);
        if j >= i {
            j += 1;
        }
        let (a, b) = (free[i].min(free[j]), free[i].max(free[j]));

        if self.links.contains_key(&(a, b)) {
            self.failures += 1;
            return Ok(MeshStep::Duplicate(a, b));
        }

        self.failures = 0;
        let edge = self.g.add_edge(self.switches[a], self.switches[b]);
        self.budget.take(a, 1);
        self.budget.take(b, 1);
        self.links.insert((a, b), edge);
        Ok(MeshStep::Linked(a, b))
    }

    /// 重复 [`Self::mesh_step`] 直到停止。
    pub fn mesh_switches(&mut self) -> Result<MeshStop> {
        let stop = loop {
            if let MeshStep::Stopped(stop) = self.mesh_step()? {
                break stop;
            }
        };

        self.report.stop = Some(stop);
        self.report.retries = self.failures;
        let free_ports = self.budget.total_free();
        debug!(?stop, links = self.links.len(), free_ports, "随机连线结束");
        if stop == MeshStop::RetryCeiling && free_ports > 0 {
            self.g.emit(BuildEvent::RetryCeilingHit {
                retries: self.failures,
                free_ports,
            });
        }
        self.enter(JellyfishPhase::PatchingExhaustedPorts);
        Ok(stop)
    }

    /// 对仍有 ≥2 个空闲端口的交换机做 2 换 1 重连：
    /// 随机拆掉一条两端都不是其邻居的链路，再把它接到原链路的两个端点上。
    ///
    /// 每次重连消耗该交换机两个端口，候选集合每轮重新计算，
    /// 找不到候选即放弃该交换机，因此一定会终止。返回重连次数。
    pub fn patch_exhausted_ports(&mut self) -> Result<usize> {
        self.require("patch_exhausted_ports", JellyfishPhase::PatchingExhaustedPorts)?;
        let mut rewires = 0;
        for s in 0..self.switches.len() {
            while self.budget.free(s) >= 2 {
                let sw = self.switches[s];
                let graph = self.g.graph();
                let switches = &self.switches;
                let eligible: Vec<(usize, usize)> = self
                    .links
                    .keys()
                    .copied()
                    .filter(|&(u, v)| {
                        u != s
                            && v != s
                            && !graph.is_neighbor(sw, switches[u])
                            && !graph.is_neighbor(sw, switches[v])
                    })
                    .collect();
                if eligible.is_empty() {
                    debug!(switch = s, free = self.budget.free(s), "没有可拆的链路");
                    break;
                }

                let (u, v) = eligible[self.rng.gen_range(0..eligible.len())];
                let Some(old) = self.links.remove(&(u, v)) else {
                    return Err(TopoError::not_found("link", format!("s{u}--s{v}")));
                };
                self.g.remove(old)?;

                for other in [u, v] {
                    let edge = self.g.add_edge(sw, self.switches[other]);
                    self.links.insert((s.min(other), s.max(other)), edge);
                }
                self.budget.take(s, 2);
                self.g.emit(BuildEvent::Rewired { switch: s, a: u, b: v });
                rewires += 1;
            }
        }

        self.report.rewires += rewires;
        debug!(rewires, free_ports = self.budget.total_free(), "端口修补结束");
        self.enter(JellyfishPhase::Done);
        Ok(rewires)
    }

    /// 依次执行所有阶段并生成拓扑
    pub fn run(mut self) -> Result<Topology> {
        while self.advance()? != JellyfishPhase::Done {}
        self.finish()
    }

    /// 记录边集合并产出拓扑，只能在 `Done` 阶段调用。
    ///
    /// 主机链路记为 `(交换机, 主机)`，交换机链路下标较小者在前。
    pub fn finish(mut self) -> Result<Topology> {
        self.require("finish", JellyfishPhase::Done)?;
        let mut edge_set = EdgeSet::default();
        for &(switch, server) in &self.host_links {
            edge_set.insert(self.switches[switch], self.servers[server]);
        }
        for &(a, b) in self.links.keys() {
            edge_set.insert(self.switches[a], self.switches[b]);
        }

        self.report.links = self.links.len();
        self.report.unresolved_ports = self.budget.total_free();
        self.g.emit(BuildEvent::Finished {
            nodes: self.g.graph().node_count(),
            edges: edge_set.len(),
            unresolved_ports: self.report.unresolved_ports,
        });
        if self.report.unresolved_ports > 0 {
            warn!(
                unresolved_ports = self.report.unresolved_ports,
                stop = ?self.report.stop,
                "Jellyfish 仍有空闲端口"
            );
        }
        info!(
            edges = edge_set.len(),
            links = self.report.links,
            rewires = self.report.rewires,
            "✅ Jellyfish 构建完成"
        );

        Ok(Topology {
            layout: Layout::Jellyfish {
                num_ports: self.opts.num_ports,
                mesh: self.report,
            },
            graph: self.g.into_graph(),
            servers: self.servers,
            edge_switches: self.switches,
            agg_switches: Vec::new(),
            core_switches: Vec::new(),
            edge_set,
        })
    }
}

/// 用给定随机源构建 Jellyfish；传入固定种子的 RNG 即可得到可复现的结果。
#[tracing::instrument(skip_all, fields(
    servers = opts.num_servers,
    switches = opts.num_switches,
    ports = opts.num_ports,
))]
pub fn build_jellyfish_with<R: Rng>(
    opts: &JellyfishOpts,
    rng: &mut R,
    observer: &mut dyn BuildObserver,
) -> Result<Topology> {
    info!("🪼 构建 Jellyfish");
    JellyfishBuilder::new(opts, rng, observer)?.run()
}
