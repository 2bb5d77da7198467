//! Command-line support for the `openapi-import` and `governance-sync` binaries

pub mod commands;
pub mod error;
pub mod logging;

pub use error::CliError;
pub use logging::init_logging;
