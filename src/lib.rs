//! Catalog Sync - governance metadata and OpenAPI import for a data catalog
//!
//! Provides:
//! - Governance sync: create-or-update of asset types, communities, domains,
//!   relation types and assignments from local JSON resource files
//! - OpenAPI import: conversion of an OpenAPI document into catalog import
//!   records, submitted as a single asynchronous import job
//! - A blocking REST client for the catalog, behind backend traits

pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
pub mod models;
pub mod requests;
pub mod resources;
pub mod sync;

// Re-export commonly used types
pub use catalog::{
    BatchImporter, CatalogBackend, CatalogClient, CatalogError, CatalogObject, ImportJobBackend,
    Job, JobState,
};
pub use config::{CatalogConfig, ConfigError};
pub use convert::{ConversionError, ConverterSettings, OpenAPIToCatalogConverter};
pub use models::{CategoryStats, ImportRecord, ObjectKind, SyncStats};
pub use requests::{RequestError, RequestMode};
pub use resources::{LoadError, LoadResult, ResourceLoader, ResourceRecord};
pub use sync::{GovernanceKind, UpsertEngine, UpsertOutcome};
