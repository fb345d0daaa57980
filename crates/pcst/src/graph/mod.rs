//! Prize graph data model.
//!
//! Purpose
//! - Hold the undirected, weighted input graph whose nodes carry non-negative
//!   prizes, addressed both by petgraph `NodeIndex` and by a unique string label.
//! - Provide `Subgraph`, the light-weight edge set used for candidate trees and
//!   for the final result (keyed by host-graph node indices).
//!
//! Assumptions and conventions
//! - The graph is simple: re-adding an edge replaces its weight.
//! - Weights and prizes are validated eagerly by `PrizeGraph::validate` (the
//!   shortest-path index calls it before any search).

mod types;

pub use types::{prize_sum, subgraph_weight, PrizeGraph, Site, Subgraph};
