//! Converts an OpenAPI document into catalog import records and submits them

use catalog_sync::cli::commands::{OpenApiImportArgs, handle_openapi_import};
use catalog_sync::cli::init_logging;
use catalog_sync::config::CONFIG_FILENAME;
use clap::Parser;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "openapi-import")]
#[command(about = "Import an OpenAPI JSON document into the governance catalog")]
#[command(version)]
struct Cli {
    /// Path to the OpenAPI JSON document
    input: PathBuf,
    /// Catalog configuration file
    #[arg(short, long, default_value = CONFIG_FILENAME)]
    config: PathBuf,
    /// Print the generated import records instead of submitting them
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let args = OpenApiImportArgs {
        input: cli.input,
        config: cli.config,
        dry_run: cli.dry_run,
    };

    // Failures are logged; the process still exits normally.
    if let Err(e) = handle_openapi_import(&args) {
        error!("Error sending import data: {}", e);
    }
}
