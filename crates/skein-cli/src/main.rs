//! Skein CLI - load a triple file and dump its graph.
//!
//! # Usage
//!
//! ```bash
//! # Dump the undirected graph
//! skein dump input.nt
//!
//! # Dump the labeled graph, labeling edges with their predicate
//! skein dump input.nt --labeled --edge-labels predicate
//!
//! # Show statistics
//! skein stats input.nt
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use skein_core::{
    EdgeLabeling, Graph, IdentityPool, LabeledGraph, LoadSummary, LoaderConfig, Progress, Symbol,
    TripleLoader, TripleSink,
};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skein")]
#[command(about = "Triple file graph loader", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Loader configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Do not draw the progress bar
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the graph, one vertex per line with its edges indented beneath
    Dump {
        /// Input file (one `src label dst .` record per line)
        input: PathBuf,

        /// Build the labeled graph instead of the plain one
        #[arg(long)]
        labeled: bool,

        /// Edge payload for the labeled graph
        #[arg(long)]
        edge_labels: Option<EdgeLabelArg>,
    },

    /// Show statistics about the graph
    Stats {
        /// Input file
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum EdgeLabelArg {
    /// Label each edge with its destination vertex
    Destination,
    /// Label each edge with its predicate token
    Predicate,
}

impl From<EdgeLabelArg> for EdgeLabeling {
    fn from(arg: EdgeLabelArg) -> Self {
        match arg {
            EdgeLabelArg::Destination => EdgeLabeling::Destination,
            EdgeLabelArg::Predicate => EdgeLabeling::Predicate,
        }
    }
}

/// Progress reporter drawing an indicatif bar on stderr.
struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    fn new(total: u64) -> Self {
        let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
        bar.set_style(
            ProgressStyle::with_template("[{bar:50}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("## "),
        );
        Self { bar }
    }
}

impl Progress for BarReporter {
    fn update(&mut self, consumed: u64, total: Option<u64>) {
        if let Some(total) = total {
            self.bar.set_length(total);
        }
        let fraction = skein_core::progress::fraction(consumed, total);
        self.bar.set_position(consumed);
        self.bar.set_message(format!("{:7.3}%", 100.0 * fraction));
    }

    fn finish(&mut self) {
        self.bar.finish();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("skein_core={level},skein={level}")))
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => LoaderConfig::from_json_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => LoaderConfig::default(),
    };

    match cli.command {
        Commands::Dump {
            input,
            labeled,
            edge_labels,
        } => {
            if let Some(edge_labels) = edge_labels {
                config = config.with_edge_labels(edge_labels.into());
            }
            cmd_dump(&input, config, labeled, cli.quiet)
        }
        Commands::Stats { input } => cmd_stats(&input, config, cli.quiet),
    }
}

fn load_into<G: TripleSink>(
    path: &Path,
    pool: &mut IdentityPool<String>,
    config: LoaderConfig,
    quiet: bool,
    graph: &mut G,
) -> Result<LoadSummary> {
    let start = Instant::now();
    let loader = TripleLoader::new(pool).with_config(config);

    let result = if quiet {
        loader.with_progress(skein_core::NoProgress).load_path(path, graph)
    } else {
        let total = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        loader
            .with_progress(BarReporter::new(total))
            .load_path(path, graph)
    };
    let summary = result.with_context(|| format!("Failed to load {}", path.display()))?;

    info!(
        records = summary.records,
        identities = summary.identities,
        vertices = summary.vertices,
        edges = summary.edges,
        "Loaded {} in {:.2?}",
        path.display(),
        start.elapsed()
    );
    Ok(summary)
}

fn cmd_dump(input: &Path, config: LoaderConfig, labeled: bool, quiet: bool) -> Result<()> {
    let mut pool = IdentityPool::new();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if labeled {
        debug!(edge_labels = ?config.edge_labels, "building labeled graph");
        let mut graph: LabeledGraph<Symbol, Symbol> = LabeledGraph::new();
        load_into(input, &mut pool, config, quiet, &mut graph)?;
        graph.write_dump(&mut out)?;
    } else {
        let mut graph: Graph<Symbol> = Graph::new();
        load_into(input, &mut pool, config, quiet, &mut graph)?;
        graph.write_dump(&mut out)?;
    }

    out.flush()?;
    Ok(())
}

fn cmd_stats(input: &Path, config: LoaderConfig, quiet: bool) -> Result<()> {
    let mut pool = IdentityPool::new();
    let mut graph: Graph<Symbol> = Graph::new();
    let summary = load_into(input, &mut pool, config, quiet, &mut graph)?;
    let stats = graph.stats();

    println!("Graph Statistics");
    println!("================");
    println!("Records:        {}", summary.records);
    println!("Identities:     {}", summary.identities);
    println!("Vertices:       {}", stats.vertex_count);
    println!("Edges:          {}", stats.edge_count);
    println!("Avg degree:     {:.2}", stats.avg_degree);

    Ok(())
}
