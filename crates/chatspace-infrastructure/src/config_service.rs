//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml`, writing the defaults
//! when the file does not exist yet.

use std::path::PathBuf;

use chatspace_core::config::ChatspaceConfig;
use chatspace_core::error::{ChatspaceError, Result};
use version_migrate::{FileStorage, FileStorageStrategy, FormatStrategy, LoadBehavior};

use crate::dto::create_config_root_migrator;
use crate::paths::ChatspacePaths;

const ENTITY: &str = "config_root";

/// Configuration service bound to one config file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    config_path: PathBuf,
}

impl ConfigService {
    pub fn new(paths: &ChatspacePaths) -> Result<Self> {
        Ok(Self {
            config_path: paths.config_file()?,
        })
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Loads the configuration, creating the file with defaults if missing.
    pub fn load(&self) -> Result<ChatspaceConfig> {
        let mut storage = self.open_storage()?;

        let configs: Vec<ChatspaceConfig> = storage
            .query(ENTITY)
            .map_err(|e| ChatspaceError::config(format!("Failed to query {}: {}", ENTITY, e)))?;

        match configs.into_iter().next() {
            Some(config) => Ok(config),
            None => {
                let default_config = ChatspaceConfig::default();
                storage
                    .update_and_save(ENTITY, vec![default_config.clone()])
                    .map_err(|e| {
                        ChatspaceError::config(format!("Failed to save default config: {}", e))
                    })?;
                tracing::info!(
                    "Wrote default configuration to {}",
                    self.config_path.display()
                );
                Ok(default_config)
            }
        }
    }

    /// Loads the configuration, falling back to defaults on any error.
    pub fn load_or_default(&self) -> ChatspaceConfig {
        self.load().unwrap_or_else(|e| {
            tracing::warn!("Using default configuration: {}", e);
            ChatspaceConfig::default()
        })
    }

    pub fn save(&self, config: &ChatspaceConfig) -> Result<()> {
        let mut storage = self.open_storage()?;
        storage
            .update_and_save(ENTITY, vec![config.clone()])
            .map_err(|e| ChatspaceError::config(format!("Failed to save {}: {}", ENTITY, e)))
    }

    fn open_storage(&self) -> Result<FileStorage> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let strategy = FileStorageStrategy::new()
            .with_format(FormatStrategy::Toml)
            .with_load_behavior(LoadBehavior::CreateIfMissing);

        FileStorage::new(
            self.config_path.clone(),
            create_config_root_migrator(),
            strategy,
        )
        .map_err(|e| ChatspaceError::config(format!("Failed to create FileStorage: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatspace_core::workspace::IdStrategy;
    use tempfile::TempDir;

    #[test]
    fn test_load_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ChatspacePaths::new(Some(temp_dir.path().into()));
        let service = ConfigService::new(&paths).unwrap();

        let config = service.load().unwrap();
        assert_eq!(config, ChatspaceConfig::default());
        assert!(service.config_path().exists());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ChatspacePaths::new(Some(temp_dir.path().into()));
        let service = ConfigService::new(&paths).unwrap();

        let config = ChatspaceConfig {
            id_strategy: IdStrategy::Uuid,
            log_filter: "debug".to_string(),
            log_to_file: true,
        };
        service.save(&config).unwrap();

        assert_eq!(service.load().unwrap(), config);
    }
}
