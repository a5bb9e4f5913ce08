//! Physarum CLI - Command-line interface for the trail simulator.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "physarum")]
#[command(author, version, about = "Physarum - agent-based trail network simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a physarum.toml for a preset
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,

        /// Preset to start from
        #[arg(long, default_value = "reference")]
        preset: String,
    },

    /// Run a simulation
    Run {
        /// Start from a preset instead of physarum.toml
        #[arg(long)]
        preset: Option<String>,

        /// Number of steps to run
        #[arg(short, long)]
        steps: Option<u64>,

        /// Number of agents
        #[arg(short, long)]
        agents: Option<usize>,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Root directory for frame output
        #[arg(short, long)]
        frames: Option<String>,

        /// Frame folder token (frames go to <frames>/sim_<token>)
        #[arg(short, long)]
        token: Option<u32>,

        /// Export a frame every N steps
        #[arg(short, long)]
        export_every: Option<u64>,

        /// Write a JSON run summary to this file
        #[arg(long)]
        summary: Option<String>,
    },

    /// List the built-in presets
    Presets,

    /// Show statistics of a dumped frame
    Inspect {
        /// Frame file (step_<n>.json)
        frame: String,
    },

    /// Time every preset for a few steps and compare
    Bench {
        /// Steps per preset
        #[arg(short, long, default_value = "100")]
        steps: u64,

        /// Random seed
        #[arg(long, default_value = "1")]
        seed: u64,

        /// Write the comparison as CSV to this file
        #[arg(long)]
        csv: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Init { path, preset } => commands::init::run(path, &preset),
        Commands::Run {
            preset,
            steps,
            agents,
            seed,
            frames,
            token,
            export_every,
            summary,
        } => commands::run::run(
            commands::run::RunOptions {
                preset,
                steps,
                agents,
                seed,
                frames,
                token,
                export_every,
                summary,
            },
            cli.verbose,
        ),
        Commands::Presets => commands::presets::run(),
        Commands::Inspect { frame } => commands::inspect::run(&frame),
        Commands::Bench { steps, seed, csv } => commands::bench::run(steps, seed, csv),
    }
}
