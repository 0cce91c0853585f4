//! Jellyfish 拓扑生成

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dctopo_rs::topo::jellyfish::{DEFAULT_RETRY_LIMIT, JellyfishOpts};
use dctopo_rs::topo::{build_jellyfish_with, observer::TracingObserver};
use dctopo_rs::viz;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Parser)]
#[command(name = "jellyfish", about = "Jellyfish 拓扑生成：按端口预算随机连接交换机")]
struct Args {
    #[arg(long)]
    servers: usize,
    #[arg(long)]
    switches: usize,
    /// 每台交换机的端口数
    #[arg(long)]
    ports: usize,
    /// 随机种子；不指定时每次结果不同
    #[arg(long)]
    seed: Option<u64>,
    /// 随机连线连续重复的上限
    #[arg(long, default_value_t = DEFAULT_RETRY_LIMIT)]
    retry_limit: usize,
    /// 仍有空闲端口时以失败退出
    #[arg(long)]
    strict: bool,
    #[arg(long)]
    json: Option<PathBuf>,
    #[arg(long)]
    dot: Option<PathBuf>,
}

fn run(args: &Args) -> dctopo_rs::Result<()> {
    let mut opts = JellyfishOpts::new(args.servers, args.switches, args.ports);
    opts.retry_limit = args.retry_limit;

    let topo = match args.seed {
        Some(seed) => {
            build_jellyfish_with(&opts, &mut StdRng::seed_from_u64(seed), &mut TracingObserver)?
        }
        None => build_jellyfish_with(&opts, &mut rand::thread_rng(), &mut TracingObserver)?,
    };

    let mesh = topo.mesh_report().cloned().unwrap_or_default();
    println!(
        "jellyfish servers={} switches={} ports={} links={} \
         switch_links={} rewires={} unresolved_ports={}",
        topo.servers().len(),
        topo.switch_count(),
        args.ports,
        topo.edges().len(),
        mesh.links,
        mesh.rewires,
        mesh.unresolved_ports
    );

    if let Some(path) = &args.json {
        viz::write_json(&topo, path)?;
    }
    if let Some(path) = &args.dot {
        viz::write_dot(&topo, path)?;
    }
    if args.strict {
        topo.ensure_fully_wired()?;
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
