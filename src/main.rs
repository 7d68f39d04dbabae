use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use itertools::Itertools;
use regcolor::{assign_registers, dot, verify, Register};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Assign registers to an interference graph by greedy coloring")]
struct Args {
    /// Edge list: one `label` or `label,label` per line.
    #[arg(short, long, value_name = "FILE")]
    graph: PathBuf,
    /// Number of registers available, at least 1.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    registers: Register,
    /// Also write the colored graph in Graphviz format.
    #[arg(short, long, value_name = "FILE")]
    dot: Option<PathBuf>,
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let graph = regcolor::load(&args.graph)
        .with_context(|| format!("failed to load graph {}", args.graph.display()))?;
    info!(
        vertices = graph.num_vertices(),
        edges = graph.num_edges(),
        max_degree = graph.max_degree(),
        "loaded graph"
    );

    let assignment = assign_registers(&graph, args.registers);

    if let Some(path) = &args.dot {
        let file = File::create(path)
            .with_context(|| format!("failed to create file {}", path.display()))?;
        let mut w = BufWriter::new(file);
        dot::write(&graph, &assignment, &mut w)
            .and_then(|_| w.flush())
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if let Err(e) = verify::verify(&graph, args.registers, &assignment) {
        bail!(
            "cannot allocate {} with {} registers: {}",
            args.graph.display(),
            args.registers,
            e
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (vertex, register) in assignment.iter().sorted() {
        writeln!(out, "{} {}", vertex, register)?;
    }

    Ok(())
}
