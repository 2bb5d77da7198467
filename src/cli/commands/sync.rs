//! `governance-sync` command handler

use super::load_config;
use crate::catalog::{CatalogBackend, CatalogClient};
use crate::cli::error::CliError;
use crate::models::SyncStats;
use crate::resources::ResourceLoader;
use crate::sync::UpsertEngine;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Arguments for the `governance-sync` command
#[derive(Debug)]
pub struct GovernanceSyncArgs {
    /// Catalog configuration file
    pub config: PathBuf,
    /// Root of the `<Kind>/*.json` resource tree
    pub resources: PathBuf,
}

/// Synchronize every resource kind and print the summary table
pub fn handle_governance_sync(args: &GovernanceSyncArgs) -> Result<SyncStats, CliError> {
    let config = load_config(&args.config)?;
    let client = CatalogClient::from_config(&config)?;

    let stats = sync_resources(&client, &args.resources);
    println!("{}", stats.format_table());
    Ok(stats)
}

/// Run the upsert engine over a resources directory
pub fn sync_resources<B: CatalogBackend>(backend: &B, resources: &Path) -> SyncStats {
    info!("Synchronizing governance resources from {}", resources.display());

    let loader = ResourceLoader::new(resources);
    let engine = UpsertEngine::new(backend);
    let mut stats = SyncStats::new();
    engine.sync_all(&loader, &mut stats);

    let errors = stats.total_errors();
    if errors > 0 {
        warn!("Synchronization finished with {} errors", errors);
    } else {
        info!("Synchronization finished");
    }
    stats
}
