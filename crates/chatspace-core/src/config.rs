//! Configuration domain model.

use serde::{Deserialize, Serialize};
use version_migrate::DeriveQueryable as Queryable;

use crate::workspace::IdStrategy;

/// Default `tracing` filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Root configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable)]
#[queryable(entity = "config_root")]
pub struct ChatspaceConfig {
    /// Generator used for new workspace ids.
    #[serde(default)]
    pub id_strategy: IdStrategy,
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Write logs to the logs directory instead of stderr.
    #[serde(default)]
    pub log_to_file: bool,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for ChatspaceConfig {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::default(),
            log_filter: default_log_filter(),
            log_to_file: false,
        }
    }
}
