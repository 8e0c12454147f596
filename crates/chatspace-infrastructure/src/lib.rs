pub mod config_service;
pub mod dto;
pub mod folder_catalog;
pub mod logging;
pub mod paths;
pub mod workspace_store;

pub use crate::config_service::ConfigService;
pub use crate::folder_catalog::{load_folder_catalog, parse_folder_catalog};
pub use crate::logging::init_logging;
pub use crate::paths::ChatspacePaths;
pub use crate::workspace_store::FileWorkspaceStore;
