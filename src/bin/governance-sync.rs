//! Creates or updates governance objects from `resources/<Kind>/*.json`

use catalog_sync::cli::commands::{GovernanceSyncArgs, handle_governance_sync};
use catalog_sync::cli::init_logging;
use catalog_sync::config::CONFIG_FILENAME;
use clap::Parser;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "governance-sync")]
#[command(about = "Synchronize asset types, communities, domains, relation types and assignments")]
#[command(version)]
struct Cli {
    /// Catalog configuration file
    #[arg(short, long, default_value = CONFIG_FILENAME)]
    config: PathBuf,
    /// Directory holding one sub-directory per object kind
    #[arg(short, long, default_value = "resources")]
    resources: PathBuf,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let args = GovernanceSyncArgs {
        config: cli.config,
        resources: cli.resources,
    };

    if let Err(e) = handle_governance_sync(&args) {
        error!("Governance sync failed: {}", e);
    }
}
