// Core functionality
pub mod core;

// Re-export commonly used types
pub use crate::core::{format_error_with_help, CatalogError, CatalogResult, CredentialStore, ErrorHelp};
