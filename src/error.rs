//! 错误类型
//!
//! 拓扑构建、图操作与配置加载共用的错误分类。

use thiserror::Error;

use crate::topo::JellyfishPhase;

/// 拓扑相关错误
#[derive(Debug, Error)]
pub enum TopoError {
    /// 构建参数不合法（例如 fat-tree 的 k 为奇数）
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// 查找或删除不存在的节点/边
    #[error("{what} not found: {key}")]
    NotFound { what: &'static str, key: String },

    /// Jellyfish 随机连线因重试上限而停止，仍有空闲端口
    #[error(
        "switch mesh stopped after {retries} consecutive duplicate picks \
         with {free_ports} free port(s) left"
    )]
    ConstructionExhausted { retries: usize, free_ports: usize },

    /// Jellyfish 构建步骤在错误的阶段被调用
    #[error("`{step}` cannot run in phase {phase:?}")]
    OutOfPhase {
        step: &'static str,
        phase: JellyfishPhase,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl TopoError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        TopoError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(what: &'static str, key: impl ToString) -> Self {
        TopoError::NotFound {
            what,
            key: key.to_string(),
        }
    }
}

pub type Result<T, E = TopoError> = std::result::Result<T, E>;
