pub mod credentials;
pub mod error;
pub mod error_help;
pub mod path;

pub use credentials::CredentialStore;
pub use error::{CatalogError, CatalogResult};
pub use error_help::{format_error_with_help, ErrorHelp};
