use crate::core::error::{CatalogError, CatalogResult};
use std::path::{Path, PathBuf};

/// Get the catalog-sync home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\catalog-sync
/// - Linux: ~/.config/catalog-sync
/// - macOS: ~/Library/Application Support/catalog-sync
pub fn catalog_sync_home() -> CatalogResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| CatalogError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("catalog-sync"))
}

/// Get the cache directory
///
/// Platform-specific locations:
/// - Windows: %LOCALAPPDATA%\catalog-sync
/// - Linux: ~/.cache/catalog-sync
/// - macOS: ~/Library/Caches/catalog-sync
pub fn cache_dir() -> CatalogResult<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .ok_or_else(|| CatalogError::Path("Could not determine cache directory".to_string()))?;
    Ok(cache_dir.join("catalog-sync"))
}

/// Get the config file path
pub fn config_file() -> CatalogResult<PathBuf> {
    Ok(catalog_sync_home()?.join("config.yaml"))
}

/// Default location of the cloned catalog repository
pub fn default_repo_dir() -> CatalogResult<PathBuf> {
    Ok(cache_dir()?.join("repo"))
}

/// Directory holding the template directories inside a catalog checkout
pub fn templates_dir(repo_dir: &Path) -> PathBuf {
    repo_dir.join("templates")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> CatalogResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
