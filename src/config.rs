//! 拓扑配置（JSON）
//!
//! ```json
//! { "kind": "fat_tree", "k": 4 }
//! { "kind": "jellyfish", "num_servers": 16, "num_switches": 20, "num_ports": 4, "seed": 7 }
//! ```
//!
//! 数值字段使用有符号整数，负数会在 [`TopologyConfig::build`] 中报告为
//! `InvalidParameter`，而不是解析失败。

use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TopoError};
use crate::topo::fat_tree::FatTreeOpts;
use crate::topo::jellyfish::JellyfishOpts;
use crate::topo::{BuildObserver, Topology, build_fat_tree, build_jellyfish_with};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopologyConfig {
    FatTree {
        k: i64,
    },
    Jellyfish {
        num_servers: i64,
        num_switches: i64,
        num_ports: i64,
        /// 不指定时使用线程本地随机源
        #[serde(default)]
        seed: Option<u64>,
        #[serde(default)]
        retry_limit: Option<i64>,
    },
}

fn to_count(name: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| TopoError::invalid(name, format!("must not be negative, got {value}")))
}

impl TopologyConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// 按配置构建拓扑
    pub fn build(&self, observer: &mut dyn BuildObserver) -> Result<Topology> {
        match *self {
            TopologyConfig::FatTree { k } => {
                let opts = FatTreeOpts { k: to_count("k", k)? };
                build_fat_tree(&opts, observer)
            }
            TopologyConfig::Jellyfish {
                num_servers,
                num_switches,
                num_ports,
                seed,
                retry_limit,
            } => {
                let mut opts = JellyfishOpts::new(
                    to_count("num_servers", num_servers)?,
                    to_count("num_switches", num_switches)?,
                    to_count("num_ports", num_ports)?,
                );
                if let Some(limit) = retry_limit {
                    opts.retry_limit = to_count("retry_limit", limit)?;
                }
                match seed {
                    Some(seed) => {
                        build_jellyfish_with(&opts, &mut StdRng::seed_from_u64(seed), observer)
                    }
                    None => build_jellyfish_with(&opts, &mut rand::thread_rng(), observer),
                }
            }
        }
    }
}
