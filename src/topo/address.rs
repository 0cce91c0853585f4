//! Fat-tree 地址标签
//!
//! 沿用 fat-tree 论文的 `10.pod.switch.id` 编址。标签只用于诊断输出，
//! 不参与连线。

/// edge 交换机：`10.<pod>.<slot>.1`，slot ∈ [0, k/2)
pub fn edge_switch(pod: usize, slot: usize) -> String {
    format!("10.{pod}.{slot}.1")
}

/// aggregation 交换机：`10.<pod>.<slot>.1`，slot ∈ [k/2, k)
pub fn aggregation_switch(pod: usize, slot: usize) -> String {
    format!("10.{pod}.{slot}.1")
}

/// core 交换机：`10.<k>.<stripe+1>.<index+1>`
pub fn core_switch(k: usize, stripe: usize, index: usize) -> String {
    format!("10.{k}.{}.{}", stripe + 1, index + 1)
}

/// 主机：`10.<pod>.<edge slot>.<host slot + 2>`（`.1` 留给 edge 交换机）
pub fn host(pod: usize, edge_slot: usize, host_slot: usize) -> String {
    format!("10.{pod}.{edge_slot}.{}", host_slot + 2)
}
