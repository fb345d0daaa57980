//! PCST timing probe on one random G(n, p) instance with sampled terminals.
//!
//! Mirrors the usual demo setup: a sparse random graph with unit weights and
//! ten prize-bearing nodes; prints the score, tree size and phase-1 rounds.

use std::time::Instant;

use pcst::prelude::*;

fn main() {
    let params = GnpParams {
        nodes: 100,
        p: 0.1,
        weights: WeightDist::Unit,
        connected: true,
    };
    let tok = ReplayToken::new(2024);
    let mut graph = erdos_renyi(params, tok).expect("valid generator params");
    sample_terminals(&mut graph, 10, WeightDist::Const(5.0), tok.next())
        .expect("enough nodes for terminals");

    let start = Instant::now();
    let res = solve_pcst(&graph, SolverCfg::default()).expect("connected instance");
    let elapsed = start.elapsed().as_secs_f64() * 1e3;

    println!(
        "nodes={} edges={} prize_nodes={}",
        graph.node_count(),
        graph.edge_count(),
        graph.terminals().len()
    );
    println!(
        "score={:.3} weight={:.3} phase1_weight={:.3} rounds={}",
        res.score,
        res.weight,
        res.phase1_weight,
        res.rounds()
    );
    println!(
        "tree_nodes={} tree_edges={} pruned={}",
        res.subgraph.node_count(),
        res.subgraph.edge_count(),
        res.pruned.len()
    );
    println!("solve_time_ms={elapsed:.3}");
}
