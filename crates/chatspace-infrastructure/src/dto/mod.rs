//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema for persisted data. They are
//! private to the infrastructure layer.
//!
//! ### WorkspaceState Version History
//! - **1.0.0**: Chat-client local storage shape (`currentWorkspaceId`, `"0"` = Everything)
//! - **1.1.0**: Tagged `current` selection
//!
//! ### ConfigRoot Version History
//! - **1.0.0**: Initial schema

mod config_root;
mod workspace_state;

pub use config_root::{ConfigRoot, ConfigRootV1_0_0, create_config_root_migrator};
pub use workspace_state::{
    SelectionDTO, WorkspaceDTO, WorkspaceStateDTO, WorkspaceStateV1_0, WorkspaceStateV1_1,
    create_workspace_state_migrator,
};
