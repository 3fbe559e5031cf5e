use crate::core::path::{config_file, default_repo_dir, ensure_dir};
use crate::core::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Git URL of the Rancher catalog to synchronize
    #[serde(default = "default_catalog_repo_url")]
    pub catalog_repo_url: String,

    /// Local checkout of the catalog (defaults to platform-specific cache directory)
    ///
    /// Default locations:
    /// - Windows: %LOCALAPPDATA%\catalog-sync\repo
    /// - Linux: ~/.cache/catalog-sync/repo
    /// - macOS: ~/Library/Caches/catalog-sync/repo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_dir: Option<String>,

    /// CMP API root
    #[serde(default = "default_cmp_base_url")]
    pub cmp_base_url: String,

    /// Rancher project API root that generated modules deploy to
    #[serde(default = "default_rancher_url")]
    pub rancher_url: String,

    /// How generated modules are registered
    #[serde(default)]
    pub module: ModuleSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSettings {
    #[serde(default = "default_module_language")]
    pub language: String,

    #[serde(default = "default_module_language")]
    pub file_type: String,

    #[serde(default = "default_event_source")]
    pub event_source: String,
}

fn default_catalog_repo_url() -> String {
    "https://github.com/rancher/community-catalog.git".to_string()
}

fn default_cmp_base_url() -> String {
    "https://sandbox.cmp.nflex.io/cmp/basic/api".to_string()
}

fn default_rancher_url() -> String {
    "http://localhost:8080/v2-beta/projects/1a5".to_string()
}

fn default_module_language() -> String {
    "python".to_string()
}

fn default_event_source() -> String {
    "service-catalog".to_string()
}

impl Default for ModuleSettings {
    fn default() -> Self {
        Self {
            language: default_module_language(),
            file_type: default_module_language(),
            event_source: default_event_source(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_repo_url: default_catalog_repo_url(),
            repo_dir: None,
            cmp_base_url: default_cmp_base_url(),
            rancher_url: default_rancher_url(),
            module: ModuleSettings::default(),
        }
    }
}

impl Config {
    /// Load config from platform-specific config directory, creating default if it doesn't exist
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\catalog-sync\config.yaml
    /// - Linux: ~/.config/catalog-sync/config.yaml
    /// - macOS: ~/Library/Application Support/catalog-sync/config.yaml
    pub fn load() -> CatalogResult<Self> {
        let config_path = config_file()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit file, which must exist
    pub fn load_from(path: &Path) -> CatalogResult<Self> {
        if !path.is_file() {
            return Err(CatalogError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| CatalogError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save config to the given path
    pub fn save_to(&self, path: &Path) -> CatalogResult<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| CatalogError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    /// Get the catalog checkout directory
    pub fn get_repo_dir(&self) -> CatalogResult<PathBuf> {
        match &self.repo_dir {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => default_repo_dir(),
        }
    }
}
