use crate::stats::PathStats;
use crate::topo::fat_tree::FatTreeOpts;
use crate::topo::jellyfish::JellyfishOpts;
use crate::topo::{NoopObserver, build_fat_tree, build_jellyfish_with};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn fat_tree_k4_server_hops() {
    let topo = build_fat_tree(&FatTreeOpts { k: 4 }, &mut NoopObserver).unwrap();
    let stats = PathStats::between_servers(&topo);

    assert_eq!(stats.pairs, 16 * 15);
    assert_eq!(stats.unreachable, 0);
    assert_eq!(stats.max_hops, 6);
    // per server: 1 neighbour on the same edge, 2 in the pod, 12 in other pods
    assert_eq!(stats.histogram, vec![0, 0, 16, 0, 32, 0, 192]);
    assert!((stats.mean_hops - 1312.0 / 240.0).abs() < 1e-9);
}

#[test]
fn disconnected_jellyfish_counts_unreachable_pairs() {
    // Every port goes to a host, so no switch links are possible.
    let opts = JellyfishOpts::new(6, 3, 2);
    let mut rng = StdRng::seed_from_u64(0);
    let topo = build_jellyfish_with(&opts, &mut rng, &mut NoopObserver).unwrap();
    let stats = PathStats::between_servers(&topo);

    assert_eq!(stats.pairs, 30);
    assert_eq!(stats.unreachable, 24);
    assert_eq!(stats.histogram, vec![0, 0, 6]);
    assert_eq!(stats.max_hops, 2);
    assert_eq!(stats.mean_hops, 2.0);
}

#[test]
fn two_switch_jellyfish_is_three_hops_across() {
    let opts = JellyfishOpts::new(2, 2, 4);
    let mut rng = StdRng::seed_from_u64(5);
    let topo = build_jellyfish_with(&opts, &mut rng, &mut NoopObserver).unwrap();
    let stats = PathStats::between_servers(&topo);

    assert_eq!(stats.pairs, 2);
    assert_eq!(stats.unreachable, 0);
    assert_eq!(stats.max_hops, 3);
}
