//! Local checkout of the catalog repository.

use crate::core::path::ensure_dir;
use crate::core::{CatalogError, CatalogResult};
use std::path::Path;
use std::process::Command;
use tracing::info;

/// Outcome of [`ensure_local_copy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalCopy {
    /// The target directory already existed and was used as-is
    Existing,
    /// The repository was cloned into the target directory
    Cloned,
}

/// Clone `url` into `target_dir` unless that directory already exists.
///
/// An existing checkout is not updated.
pub fn ensure_local_copy(url: &str, target_dir: &Path) -> CatalogResult<LocalCopy> {
    if target_dir.exists() {
        info!(dir = %target_dir.display(), "using existing catalog checkout");
        return Ok(LocalCopy::Existing);
    }

    let git = which::which("git")
        .map_err(|_| CatalogError::Vcs("git executable not found on PATH".to_string()))?;

    if let Some(parent) = target_dir.parent() {
        ensure_dir(parent)?;
    }

    info!(%url, dir = %target_dir.display(), "cloning catalog repository");
    let output = Command::new(git)
        .arg("clone")
        .arg("--quiet")
        .arg(url)
        .arg(target_dir)
        .output()
        .map_err(|e| CatalogError::Vcs(format!("Failed to run git: {}", e)))?;

    if !output.status.success() {
        return Err(CatalogError::Vcs(format!(
            "git clone {} failed: {}",
            url,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(LocalCopy::Cloned)
}
