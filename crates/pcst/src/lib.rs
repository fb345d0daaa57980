//! Prize-collecting Steiner trees: a two-phase approximation heuristic.
//!
//! Phase 1 repeatedly solves the classical Steiner tree problem (metric-closure
//! MST, expanded back into shortest paths) over the node set touched by the
//! previous round until the reported weight stops decreasing. Phase 2 trims
//! leaf terminals whose connecting edge costs more than they bring in.
//!
//! API Policy
//! - The crate is consumed by the workspace CLI and benches. There is no stable
//!   public API; prefer `api` or `prelude` imports over deep module paths.

pub mod api;
pub mod cfg;
pub mod error;
pub mod graph;
pub mod heuristic;
pub mod paths;
pub mod rand;
pub mod steiner;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::SolverCfg;
pub use error::PcstError;
pub use graph::{PrizeGraph, Site, Subgraph};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::SolverCfg;
    pub use crate::error::PcstError;
    pub use crate::graph::{prize_sum, subgraph_weight, PrizeGraph, Site, Subgraph};
    pub use crate::heuristic::{contract, prune, solve_pcst, Contraction, PcstResult, Pruned};
    pub use crate::paths::ShortestPathIndex;
    pub use crate::rand::{erdos_renyi, sample_terminals, GnpParams, ReplayToken, WeightDist};
    pub use crate::steiner::{solve_stp, SteinerTree};
    pub use petgraph::graph::NodeIndex;
}
