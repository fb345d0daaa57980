use std::collections::BTreeSet;

use petgraph::graph::NodeIndex;
use petgraph::unionfind::UnionFind;

use crate::error::PcstError;
use crate::graph::{subgraph_weight, PrizeGraph, Subgraph};
use crate::paths::ShortestPathIndex;

/// Output of one STP solve.
#[derive(Clone, Debug)]
pub struct SteinerTree {
    /// Union of the expanded shortest paths (host weights on edges).
    pub tree: Subgraph,
    /// Sum of MST edge distances in the terminal-distance graph.
    pub weight: f64,
    /// Nodes of every expanded path, in expansion order, duplicates kept.
    pub touched: Vec<NodeIndex>,
}

impl SteinerTree {
    fn empty() -> Self {
        Self {
            tree: Subgraph::new(),
            weight: 0.0,
            touched: Vec::new(),
        }
    }

    /// Distinct-edge weight of the expanded tree (`<= weight`).
    pub fn edge_weight(&self) -> f64 {
        subgraph_weight(&self.tree)
    }

    /// `touched` with set semantics.
    pub fn touched_set(&self) -> BTreeSet<NodeIndex> {
        self.touched.iter().copied().collect()
    }
}

/// Solve the Steiner tree problem for `terminals` (duplicates collapse).
///
/// `index` must be built on `graph` and have every terminal as a source.
/// Zero terminals give an empty tree, one terminal a single-node tree; both
/// have weight 0. An unreachable terminal pair fails with
/// `DisconnectedTerminals` instead of returning a partial tree; a terminal not
/// in `graph` fails with `UnknownNode`.
pub fn solve_stp(
    graph: &PrizeGraph,
    index: &ShortestPathIndex,
    terminals: impl IntoIterator<Item = NodeIndex>,
) -> Result<SteinerTree, PcstError> {
    if index.node_count() != graph.node_count() {
        return Err(PcstError::invalid(
            "shortest-path index was built on a different graph",
        ));
    }
    let terms: Vec<NodeIndex> = terminals
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if let Some(&bad) = terms.iter().find(|t| t.index() >= graph.node_count()) {
        return Err(PcstError::UnknownNode {
            label: format!("#{}", bad.index()),
        });
    }
    if let Some(&t) = terms.iter().find(|&&t| !index.is_source(t)) {
        return Err(PcstError::invalid(format!(
            "terminal {} is not a source of the shortest-path index",
            graph.label(t)
        )));
    }
    let mut out = SteinerTree::empty();
    match terms.as_slice() {
        [] => return Ok(out),
        [t] => {
            out.tree.add_node(*t);
            out.touched.push(*t);
            return Ok(out);
        }
        _ => {}
    }

    for (a, b, d) in terminal_mst(graph, index, &terms)? {
        out.weight += d;
        let path = index
            .path(a, b)
            .ok_or_else(|| disconnected(graph, a, b))?;
        for hop in path.windows(2) {
            let (u, v) = (hop[0], hop[1]);
            let w = graph.edge_weight(u, v).ok_or_else(|| {
                PcstError::invalid("shortest path uses an edge missing from the graph")
            })?;
            out.tree.add_edge(u, v, w);
        }
        out.touched.extend_from_slice(&path);
    }
    tracing::debug!(
        terminals = terms.len(),
        weight = out.weight,
        tree_nodes = out.tree.node_count(),
        tree_edges = out.tree.edge_count(),
        "stp"
    );
    Ok(out)
}

/// Kruskal over the complete terminal-distance graph.
///
/// Candidates sort by `(distance, i, j)` so equal-weight ties resolve by
/// terminal order; any tie-break yields the same total.
fn terminal_mst(
    graph: &PrizeGraph,
    index: &ShortestPathIndex,
    terms: &[NodeIndex],
) -> Result<Vec<(NodeIndex, NodeIndex, f64)>, PcstError> {
    let k = terms.len();
    let mut candidates = Vec::with_capacity(k * (k - 1) / 2);
    for (i, &a) in terms.iter().enumerate() {
        for (j, &b) in terms.iter().enumerate().skip(i + 1) {
            let d = index
                .distance(a, b)
                .ok_or_else(|| disconnected(graph, a, b))?;
            candidates.push((d, i, j));
        }
    }
    candidates.sort_by(|x, y| x.0.total_cmp(&y.0).then_with(|| (x.1, x.2).cmp(&(y.1, y.2))));

    let mut uf = UnionFind::<usize>::new(k);
    let mut edges = Vec::with_capacity(k - 1);
    for (d, i, j) in candidates {
        if uf.union(i, j) {
            edges.push((terms[i], terms[j], d));
            if edges.len() == k - 1 {
                break;
            }
        }
    }
    Ok(edges)
}

fn disconnected(graph: &PrizeGraph, a: NodeIndex, b: NodeIndex) -> PcstError {
    PcstError::DisconnectedTerminals {
        from: graph.label(a).to_string(),
        to: graph.label(b).to_string(),
    }
}
