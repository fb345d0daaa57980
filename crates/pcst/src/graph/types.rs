use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::EdgeRef;

use crate::error::PcstError;

/// Edge set over host-graph nodes; edges keep their original weights.
pub type Subgraph = UnGraphMap<NodeIndex, f64>;

/// Node payload: unique label and prize (`>= 0`; `0` means "not a terminal").
#[derive(Clone, Debug, PartialEq)]
pub struct Site {
    pub label: String,
    pub prize: f64,
}

/// Undirected weighted graph with prize-bearing nodes.
///
/// Invariants:
/// - `by_label` maps every label to its node; labels are unique.
/// - At most one edge per unordered node pair.
#[derive(Clone, Debug, Default)]
pub struct PrizeGraph {
    g: UnGraph<Site, f64>,
    by_label: HashMap<String, NodeIndex>,
}

impl PrizeGraph {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, or update the prize of an existing label.
    pub fn add_node(&mut self, label: impl Into<String>, prize: f64) -> NodeIndex {
        let label = label.into();
        if let Some(&n) = self.by_label.get(&label) {
            self.g[n].prize = prize;
            return n;
        }
        let n = self.g.add_node(Site {
            label: label.clone(),
            prize,
        });
        self.by_label.insert(label, n);
        n
    }

    fn ensure_node(&mut self, label: &str) -> NodeIndex {
        match self.by_label.get(label) {
            Some(&n) => n,
            None => self.add_node(label, 0.0),
        }
    }

    /// Insert or re-weight the edge `{a, b}`; missing endpoints get prize 0.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: f64) -> EdgeIndex {
        let na = self.ensure_node(a);
        let nb = self.ensure_node(b);
        self.g.update_edge(na, nb, weight)
    }

    pub fn set_prize(&mut self, label: &str, prize: f64) -> Result<NodeIndex, PcstError> {
        let n = self.node(label).ok_or_else(|| PcstError::UnknownNode {
            label: label.to_string(),
        })?;
        self.g[n].prize = prize;
        Ok(n)
    }

    #[inline]
    pub fn node(&self, label: &str) -> Option<NodeIndex> {
        self.by_label.get(label).copied()
    }

    #[inline]
    pub fn site(&self, n: NodeIndex) -> &Site {
        &self.g[n]
    }

    #[inline]
    pub fn label(&self, n: NodeIndex) -> &str {
        &self.g[n].label
    }

    #[inline]
    pub fn prize(&self, n: NodeIndex) -> f64 {
        self.g[n].prize
    }

    pub fn neighbors(&self, n: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.g.neighbors(n)
    }

    pub fn edge_weight(&self, a: NodeIndex, b: NodeIndex) -> Option<f64> {
        self.g.find_edge(a, b).map(|e| self.g[e])
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.g.node_count()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.g.edge_count()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.g.node_indices()
    }

    /// All edges as `(a, b, weight)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, f64)> + '_ {
        self.g
            .edge_references()
            .map(|e| (e.source(), e.target(), *e.weight()))
    }

    pub fn edge_weights_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.g.edge_weights_mut()
    }

    /// Sum of all edge weights; phase 1 seeds its upper bound with this.
    pub fn total_weight(&self) -> f64 {
        self.g.edge_weights().sum()
    }

    /// Nodes whose prize is strictly positive.
    pub fn terminals(&self) -> BTreeSet<NodeIndex> {
        self.g
            .node_indices()
            .filter(|&n| self.g[n].prize > 0.0)
            .collect()
    }

    /// Check that every weight and prize is finite and non-negative.
    pub fn validate(&self) -> Result<(), PcstError> {
        for (a, b, w) in self.edges() {
            if !(w.is_finite() && w >= 0.0) {
                return Err(PcstError::InvalidWeight {
                    from: self.label(a).to_string(),
                    to: self.label(b).to_string(),
                    weight: w,
                });
            }
        }
        for site in self.g.node_weights() {
            if !(site.prize.is_finite() && site.prize >= 0.0) {
                return Err(PcstError::InvalidPrize {
                    node: site.label.clone(),
                    prize: site.prize,
                });
            }
        }
        Ok(())
    }

    /// Borrow the underlying petgraph graph (read-only) for petgraph algorithms.
    #[inline]
    pub fn inner(&self) -> &UnGraph<Site, f64> {
        &self.g
    }
}

/// Sum of the (distinct) edge weights of a subgraph.
pub fn subgraph_weight(sub: &Subgraph) -> f64 {
    sub.all_edges().map(|(_, _, w)| *w).sum()
}

/// Sum of the prizes of `nodes` in `graph`.
pub fn prize_sum<'a>(graph: &PrizeGraph, nodes: impl IntoIterator<Item = &'a NodeIndex>) -> f64 {
    nodes.into_iter().map(|&n| graph.prize(n)).sum()
}
