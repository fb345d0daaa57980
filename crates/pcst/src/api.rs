//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI, benches
//!   and experiments. Breaking changes are allowed and expected.

// Data model
pub use crate::graph::{prize_sum, subgraph_weight, PrizeGraph, Site, Subgraph};
// Shortest paths and classical Steiner trees
pub use crate::paths::ShortestPathIndex;
pub use crate::steiner::{solve_stp, SteinerTree};
// Prize-collecting heuristic
pub use crate::heuristic::{
    contract, prune, solve_pcst, Contraction, PcstResult, Pruned, PrunedEdge, Round,
};
// Random instances
pub use crate::rand::{
    erdos_renyi, sample_terminals, unit_weights, GnpParams, ReplayToken as InstanceReplay,
    WeightDist,
};
// Configuration and errors
pub use crate::cfg::SolverCfg;
pub use crate::error::PcstError;
