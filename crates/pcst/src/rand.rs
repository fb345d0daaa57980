//! Reproducible random PCST instances (G(n, p) graphs + sampled terminals).
//!
//! Model
//! - `erdos_renyi`: nodes `n0..n{n-1}`, every pair joined with probability `p`.
//!   With `connected` set, a random recursive tree (node `i` attaches to a
//!   uniform earlier node) is laid down first so every terminal pair is
//!   reachable.
//! - `sample_terminals`: put prizes on `k` distinct uniform nodes.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use petgraph::graph::NodeIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::PcstError;
use crate::graph::PrizeGraph;

/// Distribution for edge weights and prizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WeightDist {
    Unit,
    Const(f64),
    /// Uniform on `[lo, hi)`; `lo == hi` yields `lo`.
    Uniform { lo: f64, hi: f64 },
}

impl WeightDist {
    fn validate(&self) -> Result<(), PcstError> {
        match *self {
            WeightDist::Unit => Ok(()),
            WeightDist::Const(c) if c.is_finite() && c >= 0.0 => Ok(()),
            WeightDist::Const(c) => Err(PcstError::invalid(format!(
                "constant {c} must be finite and >= 0"
            ))),
            WeightDist::Uniform { lo, hi } => {
                if !(lo.is_finite() && hi.is_finite()) {
                    return Err(PcstError::invalid("uniform bounds must be finite"));
                }
                if lo < 0.0 {
                    return Err(PcstError::invalid("uniform lo must be >= 0"));
                }
                if lo > hi {
                    return Err(PcstError::invalid("uniform lo <= hi required"));
                }
                Ok(())
            }
        }
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        match *self {
            WeightDist::Unit => 1.0,
            WeightDist::Const(c) => c,
            WeightDist::Uniform { lo, hi } if hi > lo => rng.gen_range(lo..hi),
            WeightDist::Uniform { lo, .. } => lo,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { seed, index: 0 }
    }

    /// Token for the next draw in the same stream.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            index: self.index.wrapping_add(1),
            ..self
        }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// G(n, p) parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GnpParams {
    pub nodes: usize,
    pub p: f64,
    pub weights: WeightDist,
    /// Lay down a random spanning tree before the G(n, p) edges.
    pub connected: bool,
}

impl Default for GnpParams {
    fn default() -> Self {
        Self {
            nodes: 100,
            p: 0.1,
            weights: WeightDist::Unit,
            connected: true,
        }
    }
}

impl GnpParams {
    fn validate(&self) -> Result<(), PcstError> {
        if !(0.0..=1.0).contains(&self.p) {
            return Err(PcstError::invalid("p must lie in [0, 1]"));
        }
        self.weights.validate()
    }
}

/// Draw a G(n, p) graph with prize 0 everywhere.
pub fn erdos_renyi(params: GnpParams, tok: ReplayToken) -> Result<PrizeGraph, PcstError> {
    params.validate()?;
    let mut rng = tok.to_std_rng();
    let n = params.nodes;
    let labels: Vec<String> = (0..n).map(|i| format!("n{i}")).collect();
    let mut g = PrizeGraph::new();
    for label in &labels {
        g.add_node(label.as_str(), 0.0);
    }
    if params.connected {
        for i in 1..n {
            let j = rng.gen_range(0..i);
            let w = params.weights.sample(&mut rng);
            g.add_edge(&labels[i], &labels[j], w);
        }
    }
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen_bool(params.p) {
                let w = params.weights.sample(&mut rng);
                g.add_edge(&labels[i], &labels[j], w);
            }
        }
    }
    tracing::debug!(nodes = n, edges = g.edge_count(), seed = tok.seed, "erdos_renyi");
    Ok(g)
}

/// Set a prize drawn from `prize` on `k` distinct random nodes; returns them.
pub fn sample_terminals(
    graph: &mut PrizeGraph,
    k: usize,
    prize: WeightDist,
    tok: ReplayToken,
) -> Result<Vec<NodeIndex>, PcstError> {
    prize.validate()?;
    let n = graph.node_count();
    if k > n {
        return Err(PcstError::invalid(format!(
            "cannot sample {k} terminals from {n} nodes"
        )));
    }
    let mut rng = tok.to_std_rng();
    let picked: Vec<NodeIndex> = rand::seq::index::sample(&mut rng, n, k)
        .into_iter()
        .map(NodeIndex::new)
        .collect();
    for &t in &picked {
        let label = graph.label(t).to_string();
        graph.set_prize(&label, prize.sample(&mut rng))?;
    }
    Ok(picked)
}

/// Reset every edge weight to 1.
pub fn unit_weights(graph: &mut PrizeGraph) {
    for w in graph.edge_weights_mut() {
        *w = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::algo::connected_components;

    fn edges_of(g: &PrizeGraph) -> Vec<(String, String, f64)> {
        g.edges()
            .map(|(a, b, w)| (g.label(a).to_string(), g.label(b).to_string(), w))
            .collect()
    }

    #[test]
    fn replay_token_reproduces_draws() {
        let params = GnpParams {
            nodes: 30,
            p: 0.2,
            weights: WeightDist::Uniform { lo: 1.0, hi: 5.0 },
            connected: false,
        };
        let tok = ReplayToken::new(7);
        let a = erdos_renyi(params, tok).unwrap();
        let b = erdos_renyi(params, tok).unwrap();
        assert_eq!(edges_of(&a), edges_of(&b));
        let c = erdos_renyi(params, tok.next()).unwrap();
        assert_ne!(edges_of(&a), edges_of(&c));
    }

    #[test]
    fn connected_flag_gives_one_component() {
        for seed in 0..10 {
            let params = GnpParams {
                nodes: 40,
                p: 0.0,
                ..GnpParams::default()
            };
            let g = erdos_renyi(params, ReplayToken::new(seed)).unwrap();
            assert_eq!(g.edge_count(), 39);
            assert_eq!(connected_components(g.inner()), 1);
        }
    }

    #[test]
    fn invalid_params_are_rejected() {
        let bad_p = GnpParams {
            p: 1.5,
            ..GnpParams::default()
        };
        assert!(erdos_renyi(bad_p, ReplayToken::new(0)).is_err());
        let bad_w = GnpParams {
            weights: WeightDist::Uniform { lo: 3.0, hi: 1.0 },
            ..GnpParams::default()
        };
        assert!(erdos_renyi(bad_w, ReplayToken::new(0)).is_err());
    }

    #[test]
    fn sample_terminals_sets_distinct_prizes() {
        let mut g = erdos_renyi(GnpParams::default(), ReplayToken::new(3)).unwrap();
        let picked =
            sample_terminals(&mut g, 10, WeightDist::Const(4.0), ReplayToken::new(4)).unwrap();
        assert_eq!(picked.len(), 10);
        assert_eq!(g.terminals().len(), 10);
        assert!(picked.iter().all(|&t| g.prize(t) == 4.0));
        assert!(sample_terminals(&mut g, 1000, WeightDist::Unit, ReplayToken::new(4)).is_err());
    }

    #[test]
    fn unit_weights_resets_all_edges() {
        let params = GnpParams {
            nodes: 20,
            weights: WeightDist::Uniform { lo: 2.0, hi: 9.0 },
            ..GnpParams::default()
        };
        let mut g = erdos_renyi(params, ReplayToken::new(11)).unwrap();
        unit_weights(&mut g);
        assert!(g.edges().all(|(_, _, w)| w == 1.0));
        assert_eq!(g.total_weight(), g.edge_count() as f64);
    }
}
