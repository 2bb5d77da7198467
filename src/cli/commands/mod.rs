//! CLI command implementations

pub mod openapi;
pub mod sync;

pub use openapi::{OpenApiImportArgs, handle_openapi_import};
pub use sync::{GovernanceSyncArgs, handle_governance_sync};

use crate::cli::error::CliError;
use crate::config::CatalogConfig;
use std::path::Path;
use tracing::info;

/// Load the config file, environment overrides included
pub(crate) fn load_config(path: &Path) -> Result<CatalogConfig, CliError> {
    let config = CatalogConfig::load(path)?;
    info!("Using catalog at {}", config.url);
    Ok(config)
}
