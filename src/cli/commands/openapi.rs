//! `openapi-import` command handler

use super::load_config;
use crate::catalog::{BatchImporter, CatalogClient, ImportJobBackend, Job, JobState};
use crate::cli::error::CliError;
use crate::config::ImportSettings;
use crate::convert::OpenAPIToCatalogConverter;
use crate::models::ImportRecord;
use std::path::PathBuf;
use tracing::{info, warn};

/// Arguments for the `openapi-import` command
#[derive(Debug)]
pub struct OpenApiImportArgs {
    /// OpenAPI JSON document
    pub input: PathBuf,
    /// Catalog configuration file
    pub config: PathBuf,
    /// Print the import records instead of submitting them
    pub dry_run: bool,
}

/// Convert an OpenAPI document and submit it as one import job
///
/// Returns the finished job, or `None` on a dry run.
pub fn handle_openapi_import(args: &OpenApiImportArgs) -> Result<Option<Job>, CliError> {
    let config = load_config(&args.config)?;
    let converter = OpenAPIToCatalogConverter::new(config.converter_settings());
    let records = converter.convert_file(&args.input)?;
    info!(
        "Converted {} into {} import records",
        args.input.display(),
        records.len()
    );

    if args.dry_run {
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| CliError::Serialization(e.to_string()))?;
        println!("{}", json);
        return Ok(None);
    }

    let client = CatalogClient::from_config(&config)?;
    let job = import_records(&client, &config.import, &records)?;
    Ok(Some(job))
}

/// Submit `records` and report how the job ended
pub fn import_records<B: ImportJobBackend>(
    backend: &B,
    settings: &ImportSettings,
    records: &[ImportRecord],
) -> Result<Job, CliError> {
    let job = BatchImporter::from_settings(backend, settings).import(records)?;
    match job.state {
        JobState::Completed => info!("Import job {} completed", job.id),
        state => warn!("Import job {} finished in state {}", job.id, state),
    }
    Ok(job)
}
