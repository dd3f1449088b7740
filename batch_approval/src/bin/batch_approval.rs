use std::path::PathBuf;

use batch_approval::{simulation, SimulationConfig};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "batch_approval")]
#[command(about = "Delegated batch approval of confidential notes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Mint, approve, spend and attempt invalid spends against an in-memory ledger
    Simulate {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the default simulation config as TOML
    DefaultConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Simulate { config } => {
            let config = match config {
                Some(path) => SimulationConfig::from_file(path)?,
                None => SimulationConfig::default(),
            };
            let report = simulation::run(&config, rand::thread_rng())?;

            info!(
                "proof {} spent {} notes and created {}",
                hex::encode(report.transfer.proof_id),
                report.transfer.consumed.len(),
                report.transfer.produced.len()
            );
            info!("replay: {}", report.replay);
            if let Some(e) = &report.unapproved_spend {
                info!("unapproved spend: {}", e);
            }
            info!("re-approval: {}", report.reapproval);
        }
        Command::DefaultConfig => {
            print!("{}", toml::to_string_pretty(&SimulationConfig::default())?);
        }
    }

    Ok(())
}

