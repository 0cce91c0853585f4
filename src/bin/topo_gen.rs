//! 按 JSON 配置生成拓扑并导出

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dctopo_rs::config::TopologyConfig;
use dctopo_rs::topo::observer::TracingObserver;
use dctopo_rs::viz;

#[derive(Debug, Parser)]
#[command(name = "topo-gen", about = "按 JSON 配置生成拓扑，可导出 JSON 快照与 DOT")]
struct Args {
    /// 拓扑配置 JSON 路径
    #[arg(long)]
    config: PathBuf,
    /// 输出拓扑 JSON 快照
    #[arg(long)]
    json: Option<PathBuf>,
    /// 输出 Graphviz DOT
    #[arg(long)]
    dot: Option<PathBuf>,
}

fn run(args: &Args) -> dctopo_rs::Result<()> {
    let config = TopologyConfig::from_path(&args.config)?;
    let topo = config.build(&mut TracingObserver)?;

    println!(
        "kind={:?} servers={} switches={} links={} unresolved_ports={}",
        topo.kind(),
        topo.servers().len(),
        topo.switch_count(),
        topo.edges().len(),
        topo.unresolved_ports()
    );

    if let Some(path) = &args.json {
        viz::write_json(&topo, path)?;
    }
    if let Some(path) = &args.dot {
        viz::write_dot(&topo, path)?;
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
