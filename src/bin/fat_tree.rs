//! Fat-tree 拓扑生成
//!
//! 按端口数 k 生成 fat-tree，打印各层规模，并可导出 JSON / DOT / 构建事件。

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dctopo_rs::graph::NodeRole;
use dctopo_rs::topo::fat_tree::FatTreeOpts;
use dctopo_rs::topo::{BuildLog, build_fat_tree};
use dctopo_rs::viz;

#[derive(Debug, Parser)]
#[command(name = "fat-tree", about = "Fat-tree 拓扑生成：按交换机端口数 k 构建三层拓扑")]
struct Args {
    /// 交换机端口数（偶数，≥ 2）
    #[arg(long, default_value_t = 4)]
    k: usize,
    /// 输出拓扑 JSON 快照
    #[arg(long)]
    json: Option<PathBuf>,
    /// 输出 Graphviz DOT
    #[arg(long)]
    dot: Option<PathBuf>,
    /// 输出构建事件 JSON
    #[arg(long)]
    events: Option<PathBuf>,
}

fn run(args: &Args) -> dctopo_rs::Result<()> {
    let mut log = BuildLog::default();
    let topo = build_fat_tree(&FatTreeOpts { k: args.k }, &mut log)?;

    println!(
        "fat_tree k={} core={} aggregation={} edge={} hosts={} links={}",
        args.k,
        topo.nodes_by_role(NodeRole::CoreSwitch).len(),
        topo.nodes_by_role(NodeRole::AggregationSwitch).len(),
        topo.nodes_by_role(NodeRole::EdgeSwitch).len(),
        topo.servers().len(),
        topo.edges().len()
    );

    if let Some(path) = &args.json {
        viz::write_json(&topo, path)?;
    }
    if let Some(path) = &args.dot {
        viz::write_dot(&topo, path)?;
    }
    if let Some(path) = &args.events {
        fs::write(path, serde_json::to_string(&log.events)?)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
