//! Match Simulator CLI
//!
//! demo  : run the walkthrough scenarios
//! run   : play a scenario file and write the event log as JSON lines
//! batch : replay a scenario over a range of seeds in parallel

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "match_sim", version = match_core::VERSION)]
#[command(about = "Deterministic match-action simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Run the built-in walkthrough scenarios
    Demo {
        /// Seed for squads and set-piece rolls
        #[arg(long, default_value_t = match_core::decision::DEFAULT_SEED)]
        seed: u64,

        /// Print the resulting events as JSON lines on stdout
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Play a scenario file (.json, .yaml, .yml)
    Run {
        /// Scenario file path
        #[arg(long)]
        scenario: PathBuf,

        /// Override the scenario's seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output JSON lines file (stdout when absent)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replay a scenario for seeds start..=end, one simulator per seed
    Batch {
        /// Scenario file path
        #[arg(long)]
        scenario: PathBuf,

        /// First seed
        #[arg(long, default_value_t = 1)]
        start: u64,

        /// Last seed (inclusive)
        #[arg(long, default_value_t = 16)]
        end: u64,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { seed, json } => {
            let events = match_cli::demo::run_all(seed)?;
            if json {
                print_json_lines(&events)?;
            }
        }

        Commands::Run { scenario, seed, out } => {
            let loaded = match_cli::load_scenario(&scenario)?;
            let seed = seed.unwrap_or_else(|| loaded.seed());
            let report = match_cli::run_scenario(&loaded, seed)?;

            match out {
                Some(path) => {
                    match_cli::write_json_lines(&path, &report.events)?;
                    eprintln!("Events written to: {}", path.display());
                }
                None => print_json_lines(&report.events)?,
            }

            eprintln!("   Seed:     {}", report.seed);
            eprintln!("   Events:   {}", report.events.len());
            eprintln!("   Rejected: {}", report.rejected.len());
            for rejected in &report.rejected {
                eprintln!("     #{} {}: {}", rejected.index, rejected.action, rejected.reason);
            }
            eprintln!("   Digest:   {}", report.digest);
        }

        Commands::Batch { scenario, start, end } => {
            if start > end {
                anyhow::bail!("--start ({start}) must not exceed --end ({end})");
            }
            let loaded = match_cli::load_scenario(&scenario)?;
            for entry in match_cli::run_batch(&loaded, start..=end)? {
                let line = serde_json::to_string(&entry).context("Failed to serialize batch entry")?;
                println!("{line}");
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[cfg(feature = "cli")]
fn print_json_lines(events: &[match_core::Event]) -> Result<()> {
    for event in events {
        println!("{}", serde_json::to_string(event).context("Failed to serialize event")?);
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("match_sim CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
