use crate::TopoError;
use crate::graph::{EdgeSet, Graph, Node, NodeId, NodeRole};

fn triangle() -> (Graph, NodeId, NodeId, NodeId) {
    let mut g = Graph::default();
    let s0 = g.add_node("s0", NodeRole::EdgeSwitch);
    let s1 = g.add_node("s1", NodeRole::EdgeSwitch);
    let h0 = g.add_node("h0", NodeRole::Host);
    (g, s0, s1, h0)
}

#[test]
fn add_edge_appends_same_edge_to_both_endpoints() {
    let (mut g, s0, s1, _h0) = triangle();
    let e = g.add_edge(s0, s1);

    assert_eq!(g.node(s0).edges(), &[e]);
    assert_eq!(g.node(s1).edges(), &[e]);
    assert_eq!(g.edge(e).endpoints(), Some((s0, s1)));
    assert!(g.is_neighbor(s0, s1));
    assert!(g.is_neighbor(s1, s0));
}

#[test]
fn add_edge_then_remove_restores_adjacency() {
    let (mut g, s0, s1, h0) = triangle();
    g.add_edge(s0, h0);
    let before_s0 = g.node(s0).edges().to_vec();
    let before_s1 = g.node(s1).edges().to_vec();

    let e = g.add_edge(s0, s1);
    assert_eq!(g.remove(e).unwrap(), (s0, s1));

    assert_eq!(g.node(s0).edges(), before_s0.as_slice());
    assert_eq!(g.node(s1).edges(), before_s1.as_slice());
    assert!(!g.edge(e).is_live());
    assert_eq!(g.edge(e).endpoints(), None);
    assert!(!g.is_neighbor(s0, s1));
    assert!(g.is_neighbor(s0, h0));
}

#[test]
fn remove_edge_only_detaches_owner_side() {
    let (mut g, s0, s1, _h0) = triangle();
    let e = g.add_edge(s0, s1);

    g.remove_edge(s0, e).unwrap();

    assert!(g.node(s0).edges().is_empty());
    assert_eq!(g.node(s1).edges(), &[e]);
    assert!(!g.is_neighbor(s0, s1));
    // The other side still sees the edge; it is not invalidated.
    assert!(g.is_neighbor(s1, s0));
    assert!(g.edge(e).is_live());
}

#[test]
fn removing_missing_edge_is_not_found() {
    let (mut g, s0, s1, h0) = triangle();
    let e = g.add_edge(s0, s1);

    let err = g.remove_edge(h0, e).unwrap_err();
    assert!(matches!(err, TopoError::NotFound { what: "edge", .. }), "{err}");

    g.remove(e).unwrap();
    let err = g.remove(e).unwrap_err();
    assert!(matches!(err, TopoError::NotFound { .. }), "{err}");
}

#[test]
fn remove_after_one_sided_detach_leaves_graph_untouched() {
    let (mut g, s0, s1, _h0) = triangle();
    let e = g.add_edge(s0, s1);
    g.remove_edge(s1, e).unwrap();

    let err = g.remove(e).unwrap_err();
    assert!(matches!(err, TopoError::NotFound { what: "edge", .. }), "{err}");
    assert_eq!(g.node(s0).edges(), &[e]);
    assert!(g.node(s1).edges().is_empty());
    assert!(g.edge(e).is_live());
    assert_eq!(g.edge(e).endpoints(), Some((s0, s1)));
}

#[test]
fn parallel_edges_are_tracked_independently() {
    let (mut g, s0, s1, _h0) = triangle();
    let e1 = g.add_edge(s0, s1);
    let e2 = g.add_edge(s1, s0);
    assert_eq!(g.degree(s0), 2);

    g.remove(e1).unwrap();
    assert_eq!(g.node(s0).edges(), &[e2]);
    assert!(g.is_neighbor(s0, s1));
}

#[test]
fn node_equality_uses_name_and_role_only() {
    let a = Node::new(NodeId(0), "s1", NodeRole::CoreSwitch);
    let b = Node::new(NodeId(7), "s1", NodeRole::CoreSwitch);
    let c = Node::new(NodeId(0), "s1", NodeRole::EdgeSwitch);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn find_resolves_names_and_reports_missing() {
    let (g, _s0, s1, _h0) = triangle();
    assert_eq!(g.find("s1").unwrap(), s1);
    assert!(matches!(g.find("s9"), Err(TopoError::NotFound { what: "node", .. })));
}

#[test]
fn edge_set_ignores_reversed_duplicates() {
    let mut set = EdgeSet::default();
    assert!(set.insert(NodeId(1), NodeId(2)));
    assert!(!set.insert(NodeId(1), NodeId(2)));
    assert!(!set.insert(NodeId(2), NodeId(1)));
    assert!(set.insert(NodeId(2), NodeId(3)));

    assert_eq!(set.len(), 2);
    assert!(set.contains(NodeId(2), NodeId(1)));
    assert_eq!(
        set.iter().collect::<Vec<_>>(),
        vec![(NodeId(1), NodeId(2)), (NodeId(2), NodeId(3))]
    );
}
