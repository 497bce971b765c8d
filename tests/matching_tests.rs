//! End-to-end matching scenarios over small concrete graphs.

use std::sync::OnceLock;

use lazy_static::lazy_static;
use rstest::rstest;

use argmatch::{
    Algorithm, ArGraph, Config, EqComparator, GraphBuilder, MatchMode, Matcher, NodeId,
    find_isomorphisms, find_monomorphisms, find_subgraph_isomorphisms,
};

fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn graph(n: usize, edges: &[(NodeId, NodeId)]) -> ArGraph<(), ()> {
    let mut b = GraphBuilder::new();
    for _ in 0..n {
        b.add_node(());
    }
    for &(u, v) in edges {
        b.add_edge(u, v, ());
    }
    b.build().unwrap()
}

lazy_static! {
    static ref TRIANGLE: ArGraph<(), ()> = graph(3, &[(0, 1), (1, 2), (2, 0)]);
    static ref PATH3: ArGraph<(), ()> = graph(3, &[(0, 1), (1, 2)]);
}

#[test]
fn isomorphic_triangles_have_three_rotations() {
    init_test_logger();
    let mappings = find_isomorphisms(&TRIANGLE, &TRIANGLE);
    let pairs: Vec<_> = mappings.iter().map(|m| m.pairs().to_vec()).collect();
    assert_eq!(
        pairs,
        vec![
            vec![(0, 0), (1, 1), (2, 2)],
            vec![(0, 1), (1, 2), (2, 0)],
            vec![(0, 2), (1, 0), (2, 1)],
        ]
    );
}

#[test]
fn path_into_cycle_embeds_but_is_never_isomorphic() {
    init_test_logger();
    assert_eq!(find_isomorphisms(&PATH3, &TRIANGLE).len(), 0);
    // Every rotation of the cycle hosts the path, but never as an induced
    // subgraph: the closing edge has no preimage.
    assert_eq!(find_monomorphisms(&PATH3, &TRIANGLE).len(), 3);
    assert_eq!(find_subgraph_isomorphisms(&PATH3, &TRIANGLE).len(), 0);
}

#[rstest]
#[case::matching_labels(["x", "y"], 1)]
#[case::swapped_labels(["y", "x"], 0)]
fn node_attributes_gate_the_single_edge_match(
    #[case] target_labels: [&'static str; 2],
    #[case] expected: usize,
) {
    init_test_logger();
    let mut b = GraphBuilder::<&str, ()>::new();
    b.add_node("x");
    b.add_node("y");
    b.add_edge(0, 1, ());
    let mut pattern = b.build().unwrap();
    pattern.set_node_comparator(EqComparator);

    let mut b = GraphBuilder::<&str, ()>::new();
    b.add_node(target_labels[0]);
    b.add_node(target_labels[1]);
    b.add_edge(0, 1, ());
    let target = b.build().unwrap();

    assert_eq!(find_isomorphisms(&pattern, &target).len(), expected);
}

#[rstest]
#[case::loop_matches_loop(true, 1)]
#[case::loop_needs_loop(false, 0)]
fn self_loops_must_correspond(#[case] target_has_loop: bool, #[case] expected: usize) {
    init_test_logger();
    let pattern = graph(1, &[(0, 0)]);
    let target = if target_has_loop {
        graph(1, &[(0, 0)])
    } else {
        graph(1, &[])
    };
    assert_eq!(find_isomorphisms(&pattern, &target).len(), expected);
}

#[test]
fn empty_graphs_are_isomorphic_by_the_empty_mapping() {
    init_test_logger();
    let g = graph(0, &[]);
    let mappings = find_isomorphisms(&g, &g);
    assert_eq!(mappings.len(), 1);
    assert!(mappings[0].is_empty());
}

fn k3(attrs: &dyn Fn(NodeId, NodeId) -> &'static str) -> ArGraph<(), &'static str> {
    let mut b = GraphBuilder::new();
    for _ in 0..3 {
        b.add_node(());
    }
    for u in 0..3 {
        for v in 0..3 {
            if u != v {
                b.add_edge(u, v, attrs(u, v));
            }
        }
    }
    b.build().unwrap()
}

#[test]
fn a_distinguished_edge_attribute_cuts_k3_automorphisms_to_its_stabilizer() {
    init_test_logger();
    let uniform = |_: NodeId, _: NodeId| "y";
    let marked = |u: NodeId, v: NodeId| if (u, v) == (0, 1) { "x" } else { "y" };

    let mut plain_pattern = k3(&uniform);
    plain_pattern.set_edge_comparator(EqComparator);
    let plain_target = k3(&uniform);
    assert_eq!(find_isomorphisms(&plain_pattern, &plain_target).len(), 6);

    let mut pattern = k3(&marked);
    pattern.set_edge_comparator(EqComparator);
    let target = k3(&marked);
    // Only the identity fixes the (0, 1) edge.
    assert_eq!(find_isomorphisms(&pattern, &target).len(), 1);
}

#[rstest]
#[case::vf(Algorithm::Vf)]
#[case::vf2(Algorithm::Vf2)]
fn monomorphisms_tolerate_extra_target_edges(#[case] algorithm: Algorithm) {
    init_test_logger();
    // Pattern: a single edge. Target: the triangle. Each directed triangle
    // edge hosts the pattern.
    let pattern = graph(2, &[(0, 1)]);
    let config = Config::new(MatchMode::Monomorphism, algorithm);
    let mappings = Matcher::with_config(&pattern, &TRIANGLE, config).find_all();
    assert_eq!(mappings.len(), 3);
}

#[test]
fn first_reported_mapping_is_the_lexicographic_least() {
    init_test_logger();
    let matcher = Matcher::new(&TRIANGLE, &TRIANGLE);
    let first = matcher.find_first().unwrap();
    assert_eq!(first.pairs(), &[(0, 0), (1, 1), (2, 2)]);
}
