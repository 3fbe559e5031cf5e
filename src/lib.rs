//! catalog-sync: publishes a Rancher community catalog into the CMP service catalog
//!
//! This crate re-exports core functionality from `catalog-sync-core` and
//! organizes the template parsing, module generation and reconciliation
//! modules used by the `catalog-sync` binary.

pub use catalog_sync_core::{format_error_with_help, CatalogError, CatalogResult, CredentialStore, ErrorHelp};

/// Core module re-exported from catalog-sync-core.
pub mod core {
    pub use catalog_sync_core::core::*;
    pub use catalog_sync_core::*;
}

/// Configuration management.
pub mod config;

/// Catalog repository checkout.
pub mod repo;

/// Template discovery and metadata.
pub mod template;

/// CMP API documents and client.
pub mod cmp;

/// Generated deployment modules.
pub mod module;

/// Catalog reconciliation.
pub mod sync;
