pub mod config;
pub mod error;
pub mod graph;
pub mod stats;
pub mod topo;
pub mod viz;

pub use error::{Result, TopoError};
pub use topo::{Topology, build_fattree, build_jellyfish};

#[cfg(test)]
mod test;
