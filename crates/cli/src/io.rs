//! CSV instance I/O (edge lists and prize tables) via polars.
//!
//! - Edges: `source,target[,weight]`; a missing weight column means unit weights.
//! - Prizes: a `node` column plus a prize column named on the command line.
//! Node ids are read as strings whatever type polars infers.

use anyhow::{Context, Result};
use pcst::PrizeGraph;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

fn read_csv(path: &Path) -> Result<DataFrame> {
    LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("reading {}", path.display()))?
        .collect()
        .with_context(|| format!("parsing {}", path.display()))
}

fn str_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let col = df
        .column(name)
        .with_context(|| format!("missing column `{name}`"))?
        .cast(&DataType::String)?;
    col.str()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.map(|s| s.to_string())
                .with_context(|| format!("null in column `{name}` at row {row}"))
        })
        .collect()
}

fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let col = df
        .column(name)
        .with_context(|| format!("missing column `{name}`"))?
        .cast(&DataType::Float64)?;
    col.f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.with_context(|| format!("null in column `{name}` at row {row}")))
        .collect()
}

/// Build a prize graph from an edge list and an optional prize table.
///
/// Prize rows may name nodes absent from the edge list; they become isolated
/// nodes (and the solver reports them as disconnected if their prize is > 0).
pub fn load_graph(edges: &Path, prizes: Option<&Path>, prize_column: &str) -> Result<PrizeGraph> {
    let df = read_csv(edges)?;
    let sources = str_column(&df, "source")?;
    let targets = str_column(&df, "target")?;
    let weights = match df.column("weight") {
        Ok(_) => f64_column(&df, "weight")?,
        Err(_) => vec![1.0; df.height()],
    };
    let mut graph = PrizeGraph::new();
    for ((a, b), w) in sources.iter().zip(&targets).zip(weights) {
        graph.add_edge(a, b, w);
    }
    if let Some(path) = prizes {
        let df = read_csv(path)?;
        let nodes = str_column(&df, "node")?;
        let values = f64_column(&df, prize_column)?;
        for (node, prize) in nodes.into_iter().zip(values) {
            graph.add_node(node, prize);
        }
    }
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        prize_nodes = graph.terminals().len(),
        "graph_loaded"
    );
    Ok(graph)
}

/// Write `edges.csv` and `prizes.csv` (prize column `prize`) under `dir`.
pub fn write_instance(dir: &Path, graph: &PrizeGraph) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let (mut sources, mut targets, mut weights) = (Vec::new(), Vec::new(), Vec::new());
    for (a, b, w) in graph.edges() {
        sources.push(graph.label(a).to_string());
        targets.push(graph.label(b).to_string());
        weights.push(w);
    }
    let mut edges = df!("source" => sources, "target" => targets, "weight" => weights)?;

    let (mut nodes, mut prizes) = (Vec::new(), Vec::new());
    for n in graph.node_indices() {
        let site = graph.site(n);
        nodes.push(site.label.clone());
        prizes.push(site.prize);
    }
    let mut prize_df = df!("node" => nodes, "prize" => prizes)?;

    let edges_path = dir.join("edges.csv");
    let prizes_path = dir.join("prizes.csv");
    write_csv(&edges_path, &mut edges)?;
    write_csv(&prizes_path, &mut prize_df)?;
    Ok((edges_path, prizes_path))
}

fn write_csv(path: &Path, df: &mut DataFrame) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_edges_with_default_weights_and_named_prize_column() {
        let dir = tempdir().unwrap();
        let edges = dir.path().join("edges.csv");
        let prizes = dir.path().join("prizes.csv");
        fs::write(&edges, "source,target\nA,B\nB,C\n").unwrap();
        fs::write(&prizes, "node,name\nA,10\nC,4\n").unwrap();
        let g = load_graph(&edges, Some(&prizes), "name").unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.total_weight(), 2.0);
        assert_eq!(g.prize(g.node("A").unwrap()), 10.0);
        assert_eq!(g.prize(g.node("B").unwrap()), 0.0);
        assert_eq!(g.terminals().len(), 2);
    }

    #[test]
    fn numeric_node_ids_are_read_as_labels() {
        let dir = tempdir().unwrap();
        let edges = dir.path().join("edges.csv");
        fs::write(&edges, "source,target,weight\n1,2,0.5\n2,3,1.5\n").unwrap();
        let g = load_graph(&edges, None, "prize").unwrap();
        let (n1, n2) = (g.node("1").unwrap(), g.node("2").unwrap());
        assert_eq!(g.edge_weight(n1, n2), Some(0.5));
    }

    #[test]
    fn missing_prize_column_is_an_error() {
        let dir = tempdir().unwrap();
        let edges = dir.path().join("edges.csv");
        let prizes = dir.path().join("prizes.csv");
        fs::write(&edges, "source,target\nA,B\n").unwrap();
        fs::write(&prizes, "node,prize\nA,1\n").unwrap();
        let err = load_graph(&edges, Some(&prizes), "reward").unwrap_err();
        assert!(format!("{err:#}").contains("reward"));
    }

    #[test]
    fn written_instance_loads_back() {
        let dir = tempdir().unwrap();
        let mut g = PrizeGraph::new();
        g.add_edge("n0", "n1", 2.0);
        g.add_edge("n1", "n2", 3.0);
        g.add_node("n2", 7.0);
        let (edges, prizes) = write_instance(dir.path(), &g).unwrap();
        let back = load_graph(&edges, Some(&prizes), "prize").unwrap();
        assert_eq!(back.edge_count(), 2);
        assert_eq!(back.total_weight(), 5.0);
        assert_eq!(back.prize(back.node("n2").unwrap()), 7.0);
    }
}
