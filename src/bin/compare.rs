//! 同设备量下比较 fat-tree 与 Jellyfish
//!
//! Jellyfish 使用与 fat-tree(k) 相同的设备：k³/4 台服务器、5k²/4 台交换机、每台 k 个端口。

use std::process::ExitCode;

use clap::Parser;
use dctopo_rs::Topology;
use dctopo_rs::stats::PathStats;
use dctopo_rs::topo::fat_tree::FatTreeOpts;
use dctopo_rs::topo::jellyfish::JellyfishOpts;
use dctopo_rs::topo::observer::TracingObserver;
use dctopo_rs::topo::{build_fat_tree, build_jellyfish_with};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Parser)]
#[command(name = "compare", about = "同设备量下比较 fat-tree 与 Jellyfish 的服务器间最短路径")]
struct Args {
    #[arg(long, default_value_t = 4)]
    k: usize,
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// 输出 JSON 而不是文本
    #[arg(long)]
    json: bool,
}

fn describe(name: &str, topo: &Topology, stats: &PathStats) {
    println!(
        "{name}: servers={} switches={} links={} unresolved_ports={} \
         mean_hops={:.3} max_hops={} unreachable={}",
        topo.servers().len(),
        topo.switch_count(),
        topo.edges().len(),
        topo.unresolved_ports(),
        stats.mean_hops,
        stats.max_hops,
        stats.unreachable
    );
}

fn run(args: &Args) -> dctopo_rs::Result<()> {
    let fat_tree = build_fat_tree(&FatTreeOpts { k: args.k }, &mut TracingObserver)?;
    let jf_opts = JellyfishOpts::matching_fat_tree(args.k);
    let mut rng = StdRng::seed_from_u64(args.seed);
    let jellyfish = build_jellyfish_with(&jf_opts, &mut rng, &mut TracingObserver)?;

    let ft_stats = PathStats::between_servers(&fat_tree);
    let jf_stats = PathStats::between_servers(&jellyfish);

    if args.json {
        let out = serde_json::json!({
            "k": args.k,
            "seed": args.seed,
            "fat_tree": ft_stats,
            "jellyfish": jf_stats,
            "jellyfish_unresolved_ports": jellyfish.unresolved_ports(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        describe("fat_tree", &fat_tree, &ft_stats);
        describe("jellyfish", &jellyfish, &jf_stats);
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
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
