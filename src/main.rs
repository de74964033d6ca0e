//! Command-line interface for record-maker
//!
//! # Usage Examples
//!
//! ## Generate
//! ```bash
//! # 100 orders as JSON lines, reproducible with the same seed
//! record-maker generate \
//!   --schema shapes.yaml \
//!   --record order \
//!   --count 100 \
//!   --seed 42
//!
//! # Override the shape file's directives with a plan file
//! record-maker generate --schema shapes.yaml --record order --plan order-plan.yaml
//! ```
//!
//! ## Plan
//! ```bash
//! # Print the plan derived from the shape file's directives
//! record-maker plan --schema shapes.yaml --record order
//! ```
//!
//! Logging is controlled by `RUST_LOG` and written to stderr.

use clap::{Parser, Subcommand};
use record_maker::generate::{run_generate, run_plan};
use record_maker::{GenerateArgs, PlanArgs};

#[derive(Parser)]
#[command(name = "record-maker")]
#[command(about = "Fill records with synthetic values driven by per-field directives")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate records as JSON lines on stdout
    Generate(GenerateArgs),

    /// Print the plan derived from a record's directives as YAML
    Plan(PlanArgs),
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Generate(args) => run_generate(&args, &mut out),
        Commands::Plan(args) => run_plan(&args, &mut out),
    }
}
