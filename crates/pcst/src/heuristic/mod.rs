//! Prize-collecting Steiner tree heuristic (contraction + leaf pruning).
//!
//! Purpose
//! - Phase 1 (`contract`): solve the classical STP over the prize-bearing nodes,
//!   then again over every node the previous tree touched, until the reported
//!   tree weight stops decreasing. Intermediate Steiner points join the
//!   terminal set this way.
//! - Phase 2 (`prune`): one pass over the leaf terminals of the converged tree,
//!   cutting leaves (or isolated pairs) whose prize does not pay for their edge.
//!
//! Conventions
//! - The caller's graph is never mutated; phase 2 edits an owned copy of the
//!   last accepted tree and the result is that tree minus the pruned edges.
//! - Phase 1 converges on the STP weight metric (shared sub-paths counted per
//!   path). Phase 2 starts from the tree's distinct-edge weight, so
//!   `score == prize(terminals) - weight(subgraph)` holds for every result.

mod contract;
mod prune;

pub use contract::{contract, Contraction, Round};
pub use prune::{prune, Pruned, PrunedEdge};

use std::collections::BTreeSet;

use petgraph::graph::NodeIndex;

use crate::cfg::SolverCfg;
use crate::error::PcstError;
use crate::graph::{prize_sum, subgraph_weight, PrizeGraph, Subgraph};
use crate::paths::ShortestPathIndex;

/// Final output of the heuristic.
#[derive(Clone, Debug)]
pub struct PcstResult {
    /// Converged tree minus pruned edges (and the nodes they left isolated).
    pub subgraph: Subgraph,
    /// Prize of surviving terminals minus `weight`.
    pub score: f64,
    /// Surviving terminals (prize-bearing nodes and Steiner points alike).
    pub terminals: BTreeSet<NodeIndex>,
    /// Edge weight of `subgraph`.
    pub weight: f64,
    /// STP weight of the last accepted phase-1 round.
    pub phase1_weight: f64,
    /// Every phase-1 round, accepted or not.
    pub history: Vec<Round>,
    /// Edges cut in phase 2, in visit order.
    pub pruned: Vec<PrunedEdge>,
}

impl PcstResult {
    #[inline]
    pub fn rounds(&self) -> usize {
        self.history.len()
    }

    /// Prize collected by the surviving terminals.
    pub fn prize(&self, graph: &PrizeGraph) -> f64 {
        prize_sum(graph, &self.terminals)
    }

    /// Surviving terminals by label (index order).
    pub fn labels<'g>(&self, graph: &'g PrizeGraph) -> Vec<&'g str> {
        self.terminals.iter().map(|&n| graph.label(n)).collect()
    }

    /// Subgraph edges as `(label, label, weight)`.
    pub fn edge_list<'g>(&self, graph: &'g PrizeGraph) -> Vec<(&'g str, &'g str, f64)> {
        self.subgraph
            .all_edges()
            .map(|(a, b, w)| (graph.label(a), graph.label(b), *w))
            .collect()
    }
}

/// Run both phases on `graph`.
///
/// The shortest-path index is built once: phase 1 never changes the graph, and
/// all-pairs rows do not depend on the terminal set.
pub fn solve_pcst(graph: &PrizeGraph, cfg: SolverCfg) -> Result<PcstResult, PcstError> {
    if cfg.max_rounds == Some(0) {
        return Err(PcstError::invalid("max_rounds must be >= 1"));
    }
    let index = ShortestPathIndex::all_pairs(graph, cfg)?;
    let phase1 = contract(graph, &index, cfg)?;
    let start_weight = subgraph_weight(&phase1.tree);
    let pruned = prune(graph, phase1.tree, phase1.terminals, start_weight);

    let score = prize_sum(graph, &pruned.terminals) - pruned.total_weight;
    tracing::info!(
        score,
        weight = pruned.total_weight,
        terminals = pruned.terminals.len(),
        pruned = pruned.removed.len(),
        "pcst"
    );
    Ok(PcstResult {
        subgraph: pruned.tree,
        score,
        terminals: pruned.terminals,
        weight: pruned.total_weight,
        phase1_weight: phase1.weight,
        history: phase1.history,
        pruned: pruned.removed,
    })
}
