use super::*;
use crate::cfg::SolverCfg;
use crate::error::PcstError;
use crate::graph::{PrizeGraph, Subgraph};
use crate::paths::ShortestPathIndex;
use crate::rand::{erdos_renyi, sample_terminals, GnpParams, ReplayToken, WeightDist};
use petgraph::graph::NodeIndex;
use petgraph::visit::Bfs;
use proptest::prelude::*;

fn ids(g: &PrizeGraph, labels: &[&str]) -> Vec<NodeIndex> {
    labels.iter().map(|l| g.node(l).unwrap()).collect()
}

fn is_connected(tree: &Subgraph) -> bool {
    let Some(start) = tree.nodes().next() else {
        return true;
    };
    let mut bfs = Bfs::new(tree, start);
    let mut seen = 0;
    while bfs.next(tree).is_some() {
        seen += 1;
    }
    seen == tree.node_count()
}

fn solve(g: &PrizeGraph, labels: &[&str]) -> Result<SteinerTree, PcstError> {
    let idx = ShortestPathIndex::all_pairs(g, SolverCfg::default())?;
    solve_stp(g, &idx, ids(g, labels))
}

#[test]
fn path_graph_end_to_end_terminals() {
    let mut g = PrizeGraph::new();
    g.add_edge("A", "B", 1.0);
    g.add_edge("B", "C", 1.0);
    g.add_edge("C", "D", 1.0);
    let st = solve(&g, &["A", "D"]).unwrap();
    assert!((st.weight - 3.0).abs() < 1e-12);
    assert!((st.edge_weight() - 3.0).abs() < 1e-12);
    assert_eq!(st.tree.edge_count(), 3);
    let v = ids(&g, &["A", "B", "C", "D"]);
    let (a, b, c, d) = (v[0], v[1], v[2], v[3]);
    assert!(st.tree.contains_edge(a, b));
    assert!(st.tree.contains_edge(b, c));
    assert!(st.tree.contains_edge(c, d));
    assert_eq!(st.touched, vec![a, b, c, d]);
}

#[test]
fn degenerate_terminal_sets() {
    let mut g = PrizeGraph::new();
    g.add_edge("A", "B", 2.0);
    let none = solve(&g, &[]).unwrap();
    assert_eq!(none.weight, 0.0);
    assert_eq!(none.tree.node_count(), 0);
    assert!(none.touched.is_empty());

    let one = solve(&g, &["B"]).unwrap();
    assert_eq!(one.weight, 0.0);
    assert_eq!(one.tree.node_count(), 1);
    assert_eq!(one.tree.edge_count(), 0);
    assert_eq!(one.touched, ids(&g, &["B"]));
}

#[test]
fn duplicate_terminals_collapse() {
    let mut g = PrizeGraph::new();
    g.add_edge("A", "B", 2.0);
    let st = solve(&g, &["A", "B", "A", "B"]).unwrap();
    assert!((st.weight - 2.0).abs() < 1e-12);
    assert_eq!(st.tree.edge_count(), 1);
}

#[test]
fn disconnected_terminals_fail() {
    let mut g = PrizeGraph::new();
    g.add_edge("A", "B", 1.0);
    g.add_edge("X", "Y", 1.0);
    let err = solve(&g, &["A", "Y"]).unwrap_err();
    assert_eq!(
        err,
        PcstError::DisconnectedTerminals {
            from: "A".into(),
            to: "Y".into()
        }
    );
}

#[test]
fn terminal_outside_index_sources_is_rejected() {
    let mut g = PrizeGraph::new();
    g.add_edge("A", "B", 1.0);
    g.add_edge("B", "C", 1.0);
    let idx =
        ShortestPathIndex::from_sources(&g, ids(&g, &["A"]), SolverCfg::default()).unwrap();
    let err = solve_stp(&g, &idx, ids(&g, &["A", "C"])).unwrap_err();
    assert!(matches!(err, PcstError::InvalidParams { .. }));
}

#[test]
fn terminal_outside_graph_is_unknown_node() {
    let mut g = PrizeGraph::new();
    g.add_edge("A", "B", 1.0);
    let idx = ShortestPathIndex::all_pairs(&g, SolverCfg::default()).unwrap();
    let a = g.node("A").unwrap();
    let err = solve_stp(&g, &idx, [a, NodeIndex::new(99)]).unwrap_err();
    match err {
        PcstError::UnknownNode { label } => assert_eq!(label, "#99"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn shared_subpaths_are_overcounted_in_weight_only() {
    // Star: leaves x, y, z hang off c with unit edges. Every leaf pair is at
    // distance 2, so the MST has two edges (weight 4) whose paths share one
    // leaf edge; the expanded tree only has three unit edges.
    let mut g = PrizeGraph::new();
    g.add_edge("c", "x", 1.0);
    g.add_edge("c", "y", 1.0);
    g.add_edge("c", "z", 1.0);
    let st = solve(&g, &["x", "y", "z"]).unwrap();
    assert!((st.weight - 4.0).abs() < 1e-12);
    assert!((st.edge_weight() - 3.0).abs() < 1e-12);
    assert_eq!(st.tree.edge_count(), 3);
    assert_eq!(st.touched.len(), 6);
    assert_eq!(st.touched_set().len(), 4);
    assert!(is_connected(&st.tree));
}

#[test]
fn equal_weight_msts_share_total_weight() {
    // K4 with unit weights: many spanning trees have weight 3. Building the
    // graph in different insertion orders changes which one Kruskal picks.
    let pairs = [
        ("a", "b"),
        ("a", "c"),
        ("a", "d"),
        ("b", "c"),
        ("b", "d"),
        ("c", "d"),
    ];
    let mut fwd = PrizeGraph::new();
    for (u, v) in pairs {
        fwd.add_edge(u, v, 1.0);
    }
    let mut rev = PrizeGraph::new();
    for (u, v) in pairs.iter().rev() {
        rev.add_edge(v, u, 1.0);
    }
    let all = ["a", "b", "c", "d"];
    let w_fwd = solve(&fwd, &all).unwrap();
    let w_rev = solve(&rev, &all).unwrap();
    assert!((w_fwd.weight - 3.0).abs() < 1e-12);
    assert!((w_rev.weight - 3.0).abs() < 1e-12);
    assert_eq!(w_fwd.tree.edge_count(), 3);
    assert!(is_connected(&w_fwd.tree) && is_connected(&w_rev.tree));
}

#[test]
fn steiner_point_is_discovered_through_paths() {
    // Terminals on a triangle's corners are cheaper to join via hub h.
    let mut g = PrizeGraph::new();
    for t in ["p", "q", "r"] {
        g.add_edge(t, "h", 1.0);
    }
    g.add_edge("p", "q", 3.0);
    g.add_edge("q", "r", 3.0);
    g.add_edge("r", "p", 3.0);
    let st = solve(&g, &["p", "q", "r"]).unwrap();
    let h = g.node("h").unwrap();
    assert!(st.tree.contains_node(h));
    assert!((st.weight - 4.0).abs() < 1e-12);
    assert!((st.edge_weight() - 3.0).abs() < 1e-12);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn random_terminals_are_spanned_by_a_connected_tree(
        seed in any::<u64>(),
        nodes in 2usize..30,
        k in 0usize..8,
    ) {
        let params = GnpParams {
            nodes,
            p: 0.15,
            weights: WeightDist::Uniform { lo: 1.0, hi: 6.0 },
            connected: true,
        };
        let tok = ReplayToken::new(seed);
        let mut g = erdos_renyi(params, tok).unwrap();
        let terms = sample_terminals(&mut g, k.min(nodes), WeightDist::Const(1.0), tok.next()).unwrap();
        let idx = ShortestPathIndex::all_pairs(&g, SolverCfg::default()).unwrap();
        let st = solve_stp(&g, &idx, terms.iter().copied()).unwrap();

        prop_assert!(is_connected(&st.tree));
        for t in &terms {
            prop_assert!(st.tree.contains_node(*t));
        }
        for n in &st.touched {
            prop_assert!(st.tree.contains_node(*n));
        }
        prop_assert!(st.edge_weight() <= st.weight + 1e-9);
    }
}
