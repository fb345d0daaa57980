//! Phase 1: iterate STP over a growing-then-shrinking terminal set.

use std::collections::BTreeSet;

use petgraph::graph::NodeIndex;

use crate::cfg::SolverCfg;
use crate::error::PcstError;
use crate::graph::{PrizeGraph, Subgraph};
use crate::paths::ShortestPathIndex;
use crate::steiner::solve_stp;

/// One STP round of phase 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Round {
    pub weight: f64,
    pub accepted: bool,
}

/// State at convergence.
#[derive(Clone, Debug)]
pub struct Contraction {
    /// Tree of the last accepted round.
    pub tree: Subgraph,
    /// STP weight of that round (0 for fewer than two terminals).
    pub weight: f64,
    /// Node set touched by that round; the terminal set handed to pruning.
    pub terminals: BTreeSet<NodeIndex>,
    pub history: Vec<Round>,
}

impl Contraction {
    #[inline]
    pub fn rounds(&self) -> usize {
        self.history.len()
    }

    /// Weights of accepted rounds in order; strictly decreasing after the first.
    pub fn accepted_weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.history
            .iter()
            .filter(|r| r.accepted)
            .map(|r| r.weight)
    }
}

/// Run phase 1 until a round fails to lower the STP weight.
///
/// The first round is always accepted; `graph.total_weight()` is only the
/// starting bound that forces it. Fewer than two prize-bearing nodes converge
/// immediately with weight 0 and no rounds.
pub fn contract(
    graph: &PrizeGraph,
    index: &ShortestPathIndex,
    cfg: SolverCfg,
) -> Result<Contraction, PcstError> {
    let terminals = graph.terminals();
    if terminals.len() < 2 {
        let mut tree = Subgraph::new();
        for &t in &terminals {
            tree.add_node(t);
        }
        tracing::info!(terminals = terminals.len(), "phase1 trivial");
        return Ok(Contraction {
            tree,
            weight: 0.0,
            terminals,
            history: Vec::new(),
        });
    }

    let bound = graph.total_weight();
    let mut out = Contraction {
        tree: Subgraph::new(),
        weight: bound,
        terminals,
        history: Vec::new(),
    };
    loop {
        if cfg.max_rounds.is_some_and(|cap| out.history.len() >= cap) {
            tracing::debug!(rounds = out.history.len(), "phase1 round cap reached");
            break;
        }
        let st = solve_stp(graph, index, out.terminals.iter().copied())?;
        let accepted = out.history.is_empty() || st.weight < out.weight;
        out.history.push(Round {
            weight: st.weight,
            accepted,
        });
        tracing::debug!(
            round = out.history.len(),
            new_weight = st.weight,
            total_weight = out.weight,
            accepted,
            "phase1 round"
        );
        if !accepted {
            break;
        }
        out.terminals = st.touched_set();
        out.weight = st.weight;
        out.tree = st.tree;
    }
    tracing::info!(
        rounds = out.history.len(),
        bound,
        weight = out.weight,
        terminals = out.terminals.len(),
        "phase1 converged"
    );
    Ok(out)
}
