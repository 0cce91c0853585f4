//! 图原语
//!
//! 节点/边抽象、去重边集合以及等权最短路路由表。

// 子模块声明
mod arena;
mod edge;
mod edge_set;
mod id;
mod node;
mod routing;

// 重新导出公共接口
pub use arena::Graph;
pub use edge::Edge;
pub use edge_set::EdgeSet;
pub use id::{EdgeId, NodeId};
pub use node::{Node, NodeRole};
pub use routing::RoutingTable;
