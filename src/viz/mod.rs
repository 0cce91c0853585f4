//! 拓扑导出（用于绘图和离线分析）
//!
//! - **JSON 快照**：节点（名称、角色、地址标签）与按名称表示的链路
//! - **DOT**：直接交给 Graphviz 绘图

mod dot;
mod types;

use std::fs;
use std::path::Path;

pub use dot::to_dot;
pub use types::{Snapshot, VizLinkInfo, VizNodeInfo};

use crate::error::Result;
use crate::topo::Topology;

pub fn write_json(topo: &Topology, path: impl AsRef<Path>) -> Result<()> {
    let raw = serde_json::to_string_pretty(&Snapshot::from_topology(topo))?;
    fs::write(path, raw)?;
    Ok(())
}

pub fn write_dot(topo: &Topology, path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, to_dot(topo))?;
    Ok(())
}
