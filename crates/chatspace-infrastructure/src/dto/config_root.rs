//! ConfigRoot DTOs and migrations

use serde::{Deserialize, Serialize};
use version_migrate::{IntoDomain, Versioned};

use chatspace_core::config::{ChatspaceConfig, DEFAULT_LOG_FILTER};
use chatspace_core::workspace::IdStrategy;

/// Root configuration V1.0.0 (initial version).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct ConfigRootV1_0_0 {
    /// `timestamp` or `uuid`.
    #[serde(default)]
    pub id_strategy: IdStrategy,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub log_to_file: bool,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Type alias for the latest ConfigRoot version.
pub type ConfigRoot = ConfigRootV1_0_0;

impl Default for ConfigRootV1_0_0 {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::default(),
            log_filter: default_log_filter(),
            log_to_file: false,
        }
    }
}

impl IntoDomain<ChatspaceConfig> for ConfigRootV1_0_0 {
    fn into_domain(self) -> ChatspaceConfig {
        ChatspaceConfig {
            id_strategy: self.id_strategy,
            log_filter: self.log_filter,
            log_to_file: self.log_to_file,
        }
    }
}

impl version_migrate::FromDomain<ChatspaceConfig> for ConfigRootV1_0_0 {
    fn from_domain(config: ChatspaceConfig) -> Self {
        ConfigRootV1_0_0 {
            id_strategy: config.id_strategy,
            log_filter: config.log_filter,
            log_to_file: config.log_to_file,
        }
    }
}

/// Creates and configures a Migrator instance for the root configuration.
pub fn create_config_root_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let config_path = version_migrate::Migrator::define("config_root")
        .from::<ConfigRootV1_0_0>()
        .into_with_save::<ChatspaceConfig>();

    migrator
        .register(config_path)
        .expect("Failed to register config_root migration path");

    migrator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_root_load() {
        let migrator = create_config_root_migrator();

        let toml_str = r#"
version = "1.0.0"
id_strategy = "uuid"
"#;
        let toml_value: toml::Value = toml::from_str(toml_str).unwrap();

        let config: ChatspaceConfig = migrator.load_flat_from("config_root", toml_value).unwrap();
        assert_eq!(config.id_strategy, IdStrategy::Uuid);
        assert_eq!(config.log_filter, "info");
        assert!(!config.log_to_file);
    }
}
