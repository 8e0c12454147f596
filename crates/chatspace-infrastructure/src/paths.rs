//! Path management for chatspace files.
//!
//! Platform directories come from version-migrate's `AppPaths`. A base
//! directory override puts every file under one root, which is what tests
//! and the CLI's `--config-dir` use.

use std::path::PathBuf;
use version_migrate::AppPaths;

use chatspace_core::error::{ChatspaceError, Result};

const APP_NAME: &str = "chatspace";

/// Resolved locations of chatspace files.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/chatspace/         # Config directory (or the override)
/// ├── config.toml              # ChatspaceConfig
/// ├── workspaces.json          # Saved workspaces + current selection
/// ├── folders.toml             # Folder catalog exported by the host
/// └── logs/
///     └── chatspace.log.YYYY-MM-DD
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChatspacePaths {
    base_dir: Option<PathBuf>,
}

impl ChatspacePaths {
    /// Uses `base_dir` when given, platform directories otherwise.
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => AppPaths::new(APP_NAME).config_dir().map_err(|e| {
                ChatspaceError::config(format!("Cannot find config directory: {}", e))
            }),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn workspaces_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("workspaces.json"))
    }

    pub fn folders_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("folders.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir_override() {
        let paths = ChatspacePaths::new(Some(PathBuf::from("/tmp/chatspace-test")));
        assert_eq!(
            paths.config_dir().unwrap(),
            PathBuf::from("/tmp/chatspace-test")
        );
        assert_eq!(
            paths.workspaces_file().unwrap(),
            PathBuf::from("/tmp/chatspace-test/workspaces.json")
        );
        assert!(paths.config_file().unwrap().ends_with("config.toml"));
        assert!(paths.folders_file().unwrap().ends_with("folders.toml"));
        assert!(paths.logs_dir().unwrap().ends_with("logs"));
    }

    #[test]
    fn test_platform_config_dir() {
        let config_dir = ChatspacePaths::default().config_dir().unwrap();
        // AppPaths appends the app name to the platform config directory
        assert!(config_dir.ends_with("chatspace"));
    }
}
