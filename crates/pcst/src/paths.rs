//! All-pairs shortest paths (binary-heap Dijkstra per source).
//!
//! - `ShortestPathIndex::all_pairs`: one search from every node.
//! - `ShortestPathIndex::from_sources`: searches from a chosen source set only.
//!
//! Rows are dense (`dist` + predecessor per node). Ties between equal-length
//! paths resolve by (distance, node index) in the heap and by petgraph's
//! adjacency order during relaxation, so a fixed graph always yields the same
//! paths. Searches from different sources share nothing but the read-only
//! graph, which is what lets `SolverCfg::parallel` hand them to rayon.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use rayon::prelude::*;

use crate::cfg::SolverCfg;
use crate::error::PcstError;
use crate::graph::PrizeGraph;

/// Heap entry ordered as a min-heap on `(dist, node)`.
#[derive(Clone, Copy, Debug)]
struct Frontier {
    dist: f64,
    node: NodeIndex,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Single-source result: distance and predecessor for every node.
#[derive(Clone, Debug)]
struct SourceRow {
    dist: Vec<f64>,
    pred: Vec<Option<NodeIndex>>,
}

/// Shortest-path distances and paths for a fixed graph snapshot.
///
/// Invariants:
/// - `rows[s]` is `Some` iff `s` was a source of the build.
/// - Distances are finite iff the target is reachable from the source.
#[derive(Clone, Debug)]
pub struct ShortestPathIndex {
    rows: Vec<Option<SourceRow>>,
}

impl ShortestPathIndex {
    /// Run Dijkstra from every node of `graph`.
    pub fn all_pairs(graph: &PrizeGraph, cfg: SolverCfg) -> Result<Self, PcstError> {
        Self::from_sources(graph, graph.node_indices(), cfg)
    }

    /// Run Dijkstra from each node in `sources` (duplicates collapse).
    ///
    /// Fails with `InvalidWeight` before any search if a weight is negative or
    /// not finite, and with `UnknownNode` if a source is not in `graph`.
    pub fn from_sources(
        graph: &PrizeGraph,
        sources: impl IntoIterator<Item = NodeIndex>,
        cfg: SolverCfg,
    ) -> Result<Self, PcstError> {
        graph.validate()?;
        let n = graph.node_count();
        let sources: BTreeSet<NodeIndex> = sources.into_iter().collect();
        if let Some(bad) = sources.iter().find(|s| s.index() >= n) {
            return Err(PcstError::UnknownNode {
                label: format!("#{}", bad.index()),
            });
        }
        let sources: Vec<NodeIndex> = sources.into_iter().collect();
        let searched: Vec<(NodeIndex, SourceRow)> = if cfg.parallel {
            sources
                .par_iter()
                .map(|&s| (s, dijkstra(graph, s)))
                .collect()
        } else {
            sources.iter().map(|&s| (s, dijkstra(graph, s))).collect()
        };
        let mut rows: Vec<Option<SourceRow>> = vec![None; n];
        for (s, row) in searched {
            rows[s.index()] = Some(row);
        }
        tracing::trace!(nodes = n, sources = sources.len(), "shortest_path_index");
        Ok(Self { rows })
    }

    #[inline]
    pub fn is_source(&self, u: NodeIndex) -> bool {
        self.row(u).is_some()
    }

    /// Number of nodes covered by the underlying graph snapshot.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.rows.len()
    }

    /// Shortest-path length from `u` to `v`; `None` if unreachable or `u` is not a source.
    pub fn distance(&self, u: NodeIndex, v: NodeIndex) -> Option<f64> {
        let d = *self.row(u)?.dist.get(v.index())?;
        d.is_finite().then_some(d)
    }

    /// One shortest path `u, .., v` (both endpoints included).
    pub fn path(&self, u: NodeIndex, v: NodeIndex) -> Option<Vec<NodeIndex>> {
        let row = self.row(u)?;
        if !row.dist.get(v.index())?.is_finite() {
            return None;
        }
        let mut path = vec![v];
        let mut cur = v;
        while cur != u {
            cur = row.pred[cur.index()]?;
            path.push(cur);
        }
        path.reverse();
        Some(path)
    }

    fn row(&self, u: NodeIndex) -> Option<&SourceRow> {
        self.rows.get(u.index())?.as_ref()
    }
}

fn dijkstra(graph: &PrizeGraph, source: NodeIndex) -> SourceRow {
    let g = graph.inner();
    let n = g.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut pred = vec![None; n];
    let mut heap = BinaryHeap::new();
    dist[source.index()] = 0.0;
    heap.push(Frontier {
        dist: 0.0,
        node: source,
    });
    while let Some(Frontier { dist: d, node: u }) = heap.pop() {
        if d > dist[u.index()] {
            continue; // stale entry
        }
        for e in g.edges(u) {
            let v = e.target();
            let nd = d + *e.weight();
            if nd < dist[v.index()] {
                dist[v.index()] = nd;
                pred[v.index()] = Some(u);
                heap.push(Frontier { dist: nd, node: v });
            }
        }
    }
    SourceRow { dist, pred }
}
