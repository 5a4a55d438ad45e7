//! `ai-sim` - run behavior tree scenarios headless.
//!
//! - `ai-sim run <scenario.yaml>` - tick the scenario and report what happened
//! - `ai-sim check <scenario.yaml>` - load and validate the tree, print its outline

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use ai_bt::load_tree;
use ai_sim::{DemoTaskFactory, Scenario, SimWorld, Simulation};

#[derive(Parser)]
#[command(name = "ai-sim")]
#[command(about = "Run behavior tree scenarios", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tick a scenario
    Run {
        scenario: PathBuf,

        /// Override the scenario's tick count
        #[arg(long)]
        ticks: Option<u64>,

        /// Override the scenario's seconds per tick
        #[arg(long)]
        dt: Option<f32>,
    },

    /// Validate a scenario's tree without running it
    Check { scenario: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    if cli.json {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).with_target(false).init();
    }

    match cli.command {
        Commands::Run {
            scenario,
            ticks,
            dt,
        } => run(&scenario, ticks, dt),
        Commands::Check { scenario } => check(&scenario),
    }
}

fn run(path: &Path, ticks: Option<u64>, dt: Option<f32>) -> Result<()> {
    let mut scenario = Scenario::load(path)?;
    if let Some(dt) = dt {
        anyhow::ensure!(dt.is_finite() && dt >= 0.0, "--dt must be non-negative");
        scenario.dt = dt;
    }
    let ticks = ticks.unwrap_or(scenario.ticks);

    tracing::info!(scenario = %path.display(), ticks, dt = scenario.dt, "Starting simulation");
    let mut sim = Simulation::new(&scenario)?;
    let summary = sim.run(ticks);
    sim.stop();

    tracing::info!(
        ticks = summary.ticks,
        successes = summary.successes,
        failures = summary.failures,
        restarts = summary.restarts,
        rejected_moves = summary.rejected_moves,
        position = ?summary.position,
        "Simulation finished"
    );
    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let tree = load_tree::<SimWorld, _>(
        scenario.tree.clone(),
        &DemoTaskFactory,
        scenario.runtime.clone(),
    )?;

    println!("{} ({} nodes)", scenario.runtime.name, tree.len());
    for row in tree.outline() {
        let indent = "  ".repeat((row.depth + 1).max(0) as usize);
        println!("{indent}{}", row.data);
    }
    Ok(())
}
