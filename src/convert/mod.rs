//! Conversion module
//!
//! Converts OpenAPI documents into catalog import records.

pub mod openapi_to_catalog;
pub mod references;

pub use openapi_to_catalog::{ConverterSettings, OpenAPIToCatalogConverter};
pub use references::{collect_schema_references, schema_name_from_pointer};

/// Error during conversion
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("OpenAPI document could not be read: {0}")]
    Io(String),
    #[error("OpenAPI document is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("OpenAPI document has no info.title")]
    MissingTitle,
    #[error("OpenAPI info.description could not be read: {0}")]
    InvalidDescription(String),
}
