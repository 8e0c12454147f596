//! Workspace domain models.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use version_migrate::DeriveQueryable as Queryable;

use crate::error::{ChatspaceError, Result};
use crate::folder::{Folder, FolderCatalog, FolderId};

/// Id of the synthetic "Everything" workspace. Never persisted.
pub const EVERYTHING_WORKSPACE_ID: &str = "0";

/// Display name of the synthetic "Everything" workspace.
pub const EVERYTHING_WORKSPACE_NAME: &str = "Everything";

/// A named subset of chat folders used to scope which chats are visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// Unique identifier; never equal to [`EVERYTHING_WORKSPACE_ID`] for saved entries
    pub id: String,
    /// Display name, trimmed and non-empty once committed
    pub name: String,
    /// Referenced folders in the order the user picked them
    #[serde(rename = "foldersIds")]
    pub folder_ids: Vec<FolderId>,
}

impl Workspace {
    pub fn new(id: impl Into<String>, name: impl Into<String>, folder_ids: Vec<FolderId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            folder_ids,
        }
    }

    /// The synthetic workspace that applies no folder filter.
    pub fn everything() -> Self {
        Self {
            id: EVERYTHING_WORKSPACE_ID.to_string(),
            name: EVERYTHING_WORKSPACE_NAME.to_string(),
            folder_ids: Vec::new(),
        }
    }

    pub fn is_everything(&self) -> bool {
        self.id == EVERYTHING_WORKSPACE_ID
    }

    /// Whether the id is one a saved workspace may not use.
    pub fn has_reserved_id(&self) -> bool {
        self.id.is_empty() || self.id == EVERYTHING_WORKSPACE_ID
    }

    /// Whether chats in `folder_id` are visible under this workspace.
    pub fn includes_folder(&self, folder_id: FolderId) -> bool {
        self.is_everything() || self.folder_ids.contains(&folder_id)
    }

    /// Referenced folders that still exist in the catalog, in workspace order.
    pub fn resolved_folders<'a>(&self, catalog: &'a FolderCatalog) -> Vec<&'a Folder> {
        self.folder_ids
            .iter()
            .filter_map(|id| catalog.get(*id))
            .collect()
    }

    /// Referenced folder ids the catalog no longer knows about.
    ///
    /// These are kept in the workspace; callers decide whether to show them.
    pub fn dangling_folder_ids(&self, catalog: &FolderCatalog) -> Vec<FolderId> {
        self.folder_ids
            .iter()
            .copied()
            .filter(|id| !catalog.contains(*id))
            .collect()
    }
}

/// Which workspace the user has picked.
///
/// `Everything` is a real variant rather than a magic id, so an orphaned
/// saved id can be told apart from an explicit "no filter" choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum Selection {
    #[default]
    Everything,
    Saved(String),
}

impl Selection {
    pub fn saved(id: impl Into<String>) -> Self {
        Self::Saved(id.into())
    }

    /// Parses the flat string form used by older state files.
    ///
    /// `"0"` and the empty string both mean "Everything".
    pub fn from_legacy_id(id: &str) -> Self {
        if id.is_empty() || id == EVERYTHING_WORKSPACE_ID {
            Self::Everything
        } else {
            Self::Saved(id.to_string())
        }
    }

    /// Flat string form; `Everything` becomes `"0"`.
    pub fn legacy_id(&self) -> &str {
        match self {
            Self::Everything => EVERYTHING_WORKSPACE_ID,
            Self::Saved(id) => id,
        }
    }

    pub fn is_everything(&self) -> bool {
        matches!(self, Self::Everything)
    }

    /// Finds the saved workspace this selection points at.
    pub fn find<'a>(&self, saved: &'a [Workspace]) -> Option<&'a Workspace> {
        match self {
            Self::Everything => None,
            Self::Saved(id) => saved.iter().find(|w| &w.id == id),
        }
    }

    /// The workspace in effect: the matching saved entry, or Everything.
    pub fn resolve(&self, saved: &[Workspace]) -> Workspace {
        self.find(saved).cloned().unwrap_or_else(Workspace::everything)
    }

    /// Normalizes an orphaned `Saved` id to `Everything`.
    pub fn effective(&self, saved: &[Workspace]) -> Selection {
        match self.find(saved) {
            Some(workspace) => Selection::Saved(workspace.id.clone()),
            None => Selection::Everything,
        }
    }
}

impl From<&Workspace> for Selection {
    fn from(workspace: &Workspace) -> Self {
        if workspace.is_everything() {
            Selection::Everything
        } else {
            Selection::Saved(workspace.id.clone())
        }
    }
}

/// Checks a list of saved workspaces before a store accepts it.
///
/// Ids must be non-empty, distinct, and never the Everything id.
pub fn validate_saved_workspaces(workspaces: &[Workspace]) -> Result<()> {
    let mut seen = HashSet::new();
    for workspace in workspaces {
        if workspace.has_reserved_id() {
            return Err(ChatspaceError::validation(format!(
                "workspace '{}' uses reserved id '{}'",
                workspace.name, workspace.id
            )));
        }
        if !seen.insert(workspace.id.as_str()) {
            return Err(ChatspaceError::validation(format!(
                "duplicate workspace id '{}'",
                workspace.id
            )));
        }
    }
    Ok(())
}

/// Everything a workspace store persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Queryable)]
#[queryable(entity = "workspace_state")]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceState {
    /// User-created workspaces in insertion order.
    #[serde(default)]
    pub saved_workspaces: Vec<Workspace>,
    /// The user's pick; may point at a workspace that no longer exists.
    #[serde(default)]
    pub current: Selection,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The workspace currently in effect.
    pub fn current_workspace(&self) -> Workspace {
        self.current.resolve(&self.saved_workspaces)
    }

    /// Removes saved entries with a reserved or repeated id and returns them.
    ///
    /// The first entry for a repeated id is kept.
    pub fn drop_unusable_workspaces(&mut self) -> Vec<Workspace> {
        let mut seen = HashSet::new();
        let mut dropped = Vec::new();
        let mut kept = Vec::with_capacity(self.saved_workspaces.len());
        for workspace in self.saved_workspaces.drain(..) {
            if workspace.has_reserved_id() || !seen.insert(workspace.id.clone()) {
                dropped.push(workspace);
            } else {
                kept.push(workspace);
            }
        }
        self.saved_workspaces = kept;
        dropped
    }
}
