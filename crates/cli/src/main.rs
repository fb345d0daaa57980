use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pcst::api::{
    erdos_renyi, sample_terminals, solve_pcst, unit_weights, GnpParams, InstanceReplay,
    PcstResult, PrizeGraph, SolverCfg, WeightDist,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Prize-collecting Steiner tree runner")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve a PCST instance given as CSV edge and prize lists
    Solve {
        /// CSV with `source,target[,weight]` columns
        #[arg(long)]
        edges: PathBuf,
        /// CSV with a `node` column and a prize column
        #[arg(long)]
        prizes: Option<PathBuf>,
        /// Name of the prize column in the prize CSV
        #[arg(long, default_value = "prize")]
        prize_column: String,
        /// Write the JSON result (plus provenance sidecar) here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Overwrite every edge weight with 1
        #[arg(long)]
        unit_weights: bool,
        /// Build the shortest-path index on all cores
        #[arg(long)]
        parallel: bool,
        #[arg(long)]
        max_rounds: Option<usize>,
    },
    /// Draw a random G(n, p) instance with sampled prize nodes
    Generate {
        #[arg(long, default_value_t = 100)]
        nodes: usize,
        #[arg(long, default_value_t = 0.1)]
        p: f64,
        #[arg(long, default_value_t = 10)]
        terminals: usize,
        #[arg(long, default_value_t = 1.0)]
        prize: f64,
        /// Upper bound for uniform edge weights; unit weights if omitted
        #[arg(long)]
        max_weight: Option<f64>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out_dir: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve {
            edges,
            prizes,
            prize_column,
            out,
            unit_weights,
            parallel,
            max_rounds,
        } => {
            let cfg = SolverCfg {
                parallel,
                max_rounds,
            };
            let opts = SolveOpts {
                prize_column,
                unit_weights,
                cfg,
            };
            solve(&edges, prizes.as_deref(), out.as_deref(), opts)
        }
        Action::Generate {
            nodes,
            p,
            terminals,
            prize,
            max_weight,
            seed,
            out_dir,
        } => {
            let weights = match max_weight {
                Some(hi) => WeightDist::Uniform { lo: 1.0, hi },
                None => WeightDist::Unit,
            };
            let params = GnpParams {
                nodes,
                p,
                weights,
                connected: true,
            };
            generate(params, terminals, prize, seed, &out_dir)
        }
        Action::Report => report(),
    }
}

struct SolveOpts {
    prize_column: String,
    unit_weights: bool,
    cfg: SolverCfg,
}

#[derive(Serialize)]
struct EdgeRow {
    source: String,
    target: String,
    weight: f64,
}

#[derive(Serialize)]
struct SolveReport {
    score: f64,
    weight: f64,
    prize: f64,
    phase1_weight: f64,
    rounds: usize,
    terminals: Vec<String>,
    edges: Vec<EdgeRow>,
    pruned: Vec<EdgeRow>,
}

impl SolveReport {
    fn new(graph: &PrizeGraph, res: &PcstResult) -> Self {
        let row = |a: &str, b: &str, w: f64| EdgeRow {
            source: a.to_string(),
            target: b.to_string(),
            weight: w,
        };
        Self {
            score: res.score,
            weight: res.weight,
            prize: res.prize(graph),
            phase1_weight: res.phase1_weight,
            rounds: res.rounds(),
            terminals: res.labels(graph).into_iter().map(String::from).collect(),
            edges: res
                .edge_list(graph)
                .into_iter()
                .map(|(a, b, w)| row(a, b, w))
                .collect(),
            pruned: res
                .pruned
                .iter()
                .map(|e| row(graph.label(e.node), graph.label(e.neighbor), e.weight))
                .collect(),
        }
    }
}

fn solve(edges: &Path, prizes: Option<&Path>, out: Option<&Path>, opts: SolveOpts) -> Result<()> {
    tracing::info!(edges = %edges.display(), cfg = ?opts.cfg, "solve");
    let mut graph = io::load_graph(edges, prizes, &opts.prize_column)?;
    if opts.unit_weights {
        unit_weights(&mut graph);
    }
    let res = solve_pcst(&graph, opts.cfg).context("solving PCST instance")?;
    tracing::info!(
        score = res.score,
        terminals = res.terminals.len(),
        edges = res.subgraph.edge_count(),
        "solved"
    );

    let report = SolveReport::new(&graph, &res);
    let Some(out) = out else {
        return emit_report(&report, std::io::stdout().lock());
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(&report)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let mut payload = provenance::Payload::new(serde_json::json!({
        "prize_column": opts.prize_column,
        "unit_weights": opts.unit_weights,
        "parallel": opts.cfg.parallel,
        "max_rounds": opts.cfg.max_rounds,
    }))
    .with_input(edges);
    if let Some(p) = prizes {
        payload = payload.with_input(p);
    }
    let sidecar = provenance::write_sidecar(out, payload)?;
    tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "result_written");
    Ok(())
}

/// Write `report` as the only content of `w`, so stdout stays parseable JSON.
fn emit_report(report: &SolveReport, mut w: impl std::io::Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut w, report)?;
    writeln!(w)?;
    Ok(())
}

fn generate(params: GnpParams, terminals: usize, prize: f64, seed: u64, dir: &Path) -> Result<()> {
    tracing::info!(?params, terminals, prize, seed, "generate");
    let tok = InstanceReplay::new(seed);
    let mut graph = erdos_renyi(params, tok)?;
    sample_terminals(&mut graph, terminals, WeightDist::Const(prize), tok.next())?;
    let (edges, prizes) = io::write_instance(dir, &graph)?;
    provenance::write_sidecar(
        &edges,
        provenance::Payload::new(serde_json::json!({
            "nodes": params.nodes,
            "p": params.p,
            "terminals": terminals,
            "prize": prize,
            "seed": seed,
        })),
    )?;
    println!("{}\n{}", edges.display(), prizes.display());
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "pcst_version": pcst::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
