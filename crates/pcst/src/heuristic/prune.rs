//! Phase 2: single-pass leaf trimming.

use std::collections::BTreeSet;

use petgraph::graph::NodeIndex;

use crate::graph::{PrizeGraph, Subgraph};

/// An edge cut by the pruner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrunedEdge {
    /// Leaf terminal that triggered the cut.
    pub node: NodeIndex,
    pub neighbor: NodeIndex,
    pub weight: f64,
    /// `true` if the edge was an isolated pair and both ends left the terminal set.
    pub pair: bool,
}

#[derive(Clone, Debug)]
pub struct Pruned {
    pub tree: Subgraph,
    pub terminals: BTreeSet<NodeIndex>,
    pub total_weight: f64,
    pub removed: Vec<PrunedEdge>,
}

/// Trim leaf terminals whose prize does not cover their edge.
///
/// Candidates are the terminals of degree 1 at entry, visited in tree order.
/// At visit time a candidate must still be a terminal of degree 1:
/// - neighbour degree > 1: cut if `prize(node) < w`, drop `node`;
/// - neighbour degree == 1: cut if `prize(node) + prize(neighbor) < w`, drop both.
///
/// Leaves exposed by a cut are not revisited. Nodes a cut leaves isolated and
/// outside the terminal set are removed from the tree.
pub fn prune(
    graph: &PrizeGraph,
    mut tree: Subgraph,
    mut terminals: BTreeSet<NodeIndex>,
    mut total_weight: f64,
) -> Pruned {
    let leaves: Vec<NodeIndex> = tree
        .nodes()
        .filter(|n| terminals.contains(n) && tree.neighbors(*n).count() == 1)
        .collect();
    let mut removed = Vec::new();
    for node in leaves {
        if !terminals.contains(&node) {
            continue;
        }
        let mut nbrs = tree.neighbors(node);
        let (Some(neighbor), None) = (nbrs.next(), nbrs.next()) else {
            continue;
        };
        let Some(&weight) = tree.edge_weight(node, neighbor) else {
            continue;
        };
        let pair = tree.neighbors(neighbor).count() == 1;
        let gain = if pair {
            graph.prize(node) + graph.prize(neighbor)
        } else {
            graph.prize(node)
        };
        if gain < weight {
            tree.remove_edge(node, neighbor);
            total_weight -= weight;
            terminals.remove(&node);
            if pair {
                terminals.remove(&neighbor);
            }
            tracing::debug!(
                node = graph.label(node),
                neighbor = graph.label(neighbor),
                weight,
                pair,
                "prune"
            );
            removed.push(PrunedEdge {
                node,
                neighbor,
                weight,
                pair,
            });
        }
    }

    let orphans: Vec<NodeIndex> = tree
        .nodes()
        .filter(|n| !terminals.contains(n) && tree.neighbors(*n).next().is_none())
        .collect();
    for n in orphans {
        tree.remove_node(n);
    }
    Pruned {
        tree,
        terminals,
        total_weight,
        removed,
    }
}
