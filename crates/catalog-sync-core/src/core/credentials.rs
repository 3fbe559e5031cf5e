use crate::core::{CatalogError, CatalogResult};
use keyring::Entry;

/// Service name for keyring entries
const KEYRING_SERVICE: &str = "catalog-sync";

/// Keychain key for the CMP API key (basic auth username)
pub const CMP_API_KEY: &str = "cmp_api_key";
/// Keychain key for the CMP secret key (basic auth password)
pub const CMP_SECRET_KEY: &str = "cmp_secret_key";
/// Keychain key for the Rancher access key embedded in generated modules
pub const RANCHER_ACCESS_KEY: &str = "rancher_access_key";
/// Keychain key for the Rancher secret key embedded in generated modules
pub const RANCHER_SECRET_KEY: &str = "rancher_secret_key";

/// Manages credential storage using OS keychain
///
/// Platform support:
/// - macOS: Keychain
/// - Windows: Credential Manager
/// - Linux: kernel keyutils
pub struct CredentialStore;

impl CredentialStore {
    /// Store a credential in the OS keychain.
    ///
    /// The value is read back before returning; a store that cannot be
    /// read back is removed and reported as an error.
    pub fn store(key: &str, value: &str) -> CatalogResult<()> {
        let entry = Entry::new(KEYRING_SERVICE, key).map_err(|e| {
            CatalogError::Credentials(format!("Failed to create keyring entry: {}", e))
        })?;

        entry.set_password(value).map_err(|e| {
            CatalogError::Credentials(format!("Failed to store credential in keychain: {}", e))
        })?;

        match Self::retrieve(key) {
            Ok(stored) if stored == value => Ok(()),
            _ => {
                let _ = Self::delete(key);
                Err(CatalogError::Credentials(format!(
                    "Stored '{}' but could not read it back; no usable keychain backend",
                    key
                )))
            }
        }
    }

    /// Retrieve a credential from the OS keychain
    pub fn retrieve(key: &str) -> CatalogResult<String> {
        let entry = Entry::new(KEYRING_SERVICE, key).map_err(|e| {
            CatalogError::Credentials(format!("Failed to create keyring entry: {}", e))
        })?;

        let password = entry.get_password().map_err(|e| {
            CatalogError::Credentials(format!(
                "Failed to retrieve '{}' from keychain: {}",
                key, e
            ))
        })?;

        Ok(password)
    }

    /// Resolve a credential: an explicit value wins, otherwise the keychain is consulted.
    pub fn resolve(explicit: Option<String>, key: &str) -> CatalogResult<String> {
        match explicit {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Self::retrieve(key),
        }
    }

    /// Delete a credential from the OS keychain
    pub fn delete(key: &str) -> CatalogResult<()> {
        let entry = Entry::new(KEYRING_SERVICE, key).map_err(|e| {
            CatalogError::Credentials(format!("Failed to create keyring entry: {}", e))
        })?;

        entry.delete_credential().map_err(|e| {
            CatalogError::Credentials(format!("Failed to delete credential from keychain: {}", e))
        })?;

        Ok(())
    }

    /// Check if a credential exists in the keychain
    pub fn exists(key: &str) -> bool {
        Self::retrieve(key).is_ok()
    }
}
