//! WorkspaceState DTOs and migrations
//!
//! The first schema stored the selection as a bare string with `"0"` meaning
//! "Everything". V1.1 stores an explicit tagged selection instead.

use serde::{Deserialize, Serialize};
use version_migrate::{IntoDomain, Versioned};

use chatspace_core::workspace::{Selection, Workspace, WorkspaceState};

/// Persisted workspace entry, shared by every schema version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceDTO {
    pub id: String,
    pub name: String,
    /// Older writers occasionally omitted the list entirely.
    #[serde(default)]
    pub folders_ids: Vec<i32>,
}

impl From<WorkspaceDTO> for Workspace {
    fn from(dto: WorkspaceDTO) -> Self {
        Workspace {
            id: dto.id,
            name: dto.name,
            folder_ids: dto.folders_ids,
        }
    }
}

impl From<Workspace> for WorkspaceDTO {
    fn from(workspace: Workspace) -> Self {
        WorkspaceDTO {
            id: workspace.id,
            name: workspace.name,
            folders_ids: workspace.folder_ids,
        }
    }
}

/// Persisted selection for V1.1 and later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum SelectionDTO {
    #[default]
    Everything,
    Saved(String),
}

impl From<SelectionDTO> for Selection {
    fn from(dto: SelectionDTO) -> Self {
        match dto {
            SelectionDTO::Everything => Selection::Everything,
            SelectionDTO::Saved(id) => Selection::Saved(id),
        }
    }
}

impl From<Selection> for SelectionDTO {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Everything => SelectionDTO::Everything,
            Selection::Saved(id) => SelectionDTO::Saved(id),
        }
    }
}

/// Workspace state V1.0.0 (initial version).
///
/// Field names follow the chat client's local storage (`savedWorkspaces`,
/// `currentWorkspaceId`, `"0"` for "Everything"), but the file still nests
/// each record under the `workspace_state` key with a `version` field.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceStateV1_0 {
    #[serde(default)]
    pub saved_workspaces: Vec<WorkspaceDTO>,
    #[serde(default)]
    pub current_workspace_id: String,
}

/// Workspace state V1.1.0.
///
/// Replaced `current_workspace_id` with a tagged selection.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceStateV1_1 {
    #[serde(default)]
    pub saved_workspaces: Vec<WorkspaceDTO>,
    #[serde(default)]
    pub current: SelectionDTO,
}

/// Type alias for the latest WorkspaceState version.
pub type WorkspaceStateDTO = WorkspaceStateV1_1;

impl Default for WorkspaceStateV1_0 {
    fn default() -> Self {
        Self {
            saved_workspaces: Vec::new(),
            current_workspace_id: String::new(),
        }
    }
}

impl Default for WorkspaceStateV1_1 {
    fn default() -> Self {
        Self {
            saved_workspaces: Vec::new(),
            current: SelectionDTO::Everything,
        }
    }
}

// ============================================================================
// Migration implementations
// ============================================================================

/// Migration from WorkspaceStateV1_0 to WorkspaceStateV1_1.
/// The sentinel id becomes `Everything`; any other id becomes `Saved`.
impl version_migrate::MigratesTo<WorkspaceStateV1_1> for WorkspaceStateV1_0 {
    fn migrate(self) -> WorkspaceStateV1_1 {
        WorkspaceStateV1_1 {
            saved_workspaces: self.saved_workspaces,
            current: Selection::from_legacy_id(&self.current_workspace_id).into(),
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

/// Convert WorkspaceStateV1_1 DTO to domain model.
impl IntoDomain<WorkspaceState> for WorkspaceStateV1_1 {
    fn into_domain(self) -> WorkspaceState {
        WorkspaceState {
            saved_workspaces: self.saved_workspaces.into_iter().map(Into::into).collect(),
            current: self.current.into(),
        }
    }
}

/// Convert domain model to WorkspaceStateV1_1 DTO for persistence.
impl version_migrate::FromDomain<WorkspaceState> for WorkspaceStateV1_1 {
    fn from_domain(state: WorkspaceState) -> Self {
        WorkspaceStateV1_1 {
            saved_workspaces: state.saved_workspaces.into_iter().map(Into::into).collect(),
            current: state.current.into(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates and configures a Migrator instance for WorkspaceState entities.
///
/// # Migration Path
///
/// - V1.0 → V1.1: Replaces the `"0"` sentinel with a tagged selection
/// - V1.1 → WorkspaceState: Converts DTO to domain model
pub fn create_workspace_state_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let state_path = version_migrate::Migrator::define("workspace_state")
        .from::<WorkspaceStateV1_0>()
        .step::<WorkspaceStateV1_1>()
        .into_with_save::<WorkspaceState>();

    migrator
        .register(state_path)
        .expect("Failed to register workspace_state migration path");

    migrator
}
