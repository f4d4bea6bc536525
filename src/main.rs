use std::path::PathBuf;

use clap::Parser;
use rustnpu::{LowerError, capability, default_registry, load_graph_from_path, lower_graph};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Validate and lower portable NN graphs for the NPU backend", long_about = None)]
struct Cli {
    /// Path to a portable graph file (.json)
    graph: PathBuf,
    /// Commit the full lowering and print the backend graph summary.
    #[arg(long)]
    lower: bool,
    /// Stop after the per-node capability report.
    #[arg(long, conflicts_with = "lower")]
    validate_only: bool,
}

fn run() -> Result<(), LowerError> {
    let cli = Cli::parse();
    let graph = load_graph_from_path(&cli.graph)?;
    let registry = default_registry();

    println!(
        "Loaded graph from `{}` with {} node units ({} inputs, {} outputs).",
        cli.graph.display(),
        graph.node_units.len(),
        graph.graph_inputs.len(),
        graph.graph_outputs.len()
    );

    let report = capability(&graph, &registry);
    let supported = report.iter().filter(|s| s.supported).count();
    println!("Capability: {}/{} node units supported.", supported, report.len());
    for support in &report {
        match &support.reason {
            None => println!("  - {} ({}): supported", support.name, support.op_type),
            Some(reason) => println!(
                "  - {} ({}): unsupported ({})",
                support.name, support.op_type, reason
            ),
        }
    }

    if cli.validate_only || !cli.lower {
        return Ok(());
    }

    let backend = lower_graph(&graph, &registry)?;
    println!(
        "Lowered graph: {} tensors, {} nodes.",
        backend.tensor_count(),
        backend.node_count()
    );
    for node in backend.nodes() {
        println!("{node}");
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
