//! Classical Steiner tree (metric-closure MST 2-approximation).
//!
//! Purpose
//! - Connect a terminal set through the host graph: build the complete
//!   terminal-distance graph, take its MST (Kruskal), and expand every MST edge
//!   back into its shortest path.
//!
//! Weight convention
//! - `SteinerTree::weight` sums the MST edge distances. Paths that share host
//!   edges count them once per path, so the figure is an upper bound on the
//!   expanded tree's edge sum (`SteinerTree::edge_weight`). The PCST loop
//!   converges on this figure.

mod solve;

pub use solve::{solve_stp, SteinerTree};

#[cfg(test)]
mod tests;
