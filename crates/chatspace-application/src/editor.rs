//! Workspace editor
//!
//! Form state behind the workspace settings page. One editor instance backs
//! one visit to the page, either creating a new workspace or editing an
//! existing one, and ends in the `Committed` phase after a successful submit.

use std::sync::Arc;

use chatspace_core::error::{ChatspaceError, Result};
use chatspace_core::folder::{Folder, FolderCatalog, FolderId};
use chatspace_core::workspace::{
    Selection, Workspace, WorkspaceIdGenerator, WorkspaceStore, generate_unique_id,
};

/// Called when the editor is done and the page should close.
pub type BackCallback = Box<dyn FnMut() + Send>;

/// Whether the editor creates a workspace or edits one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { workspace_id: String },
}

impl EditorMode {
    /// `Some(id)` edits, `None` creates.
    pub fn from_workspace_id(workspace_id: Option<String>) -> Self {
        match workspace_id {
            Some(workspace_id) => EditorMode::Edit { workspace_id },
            None => EditorMode::Create,
        }
    }

    pub fn workspace_id(&self) -> Option<&str> {
        match self {
            EditorMode::Create => None,
            EditorMode::Edit { workspace_id } => Some(workspace_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// Not loaded yet.
    Idle,
    Editing,
    /// Submitted; the editor accepts no further changes.
    Committed,
}

/// Result of checking the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// Name is empty or whitespace only.
    EmptyName,
    NoFolders,
}

/// Why a submit did not change the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Invalid(Validation),
    AlreadyCommitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Workspace),
    Updated(Workspace),
    Rejected(Rejection),
}

/// A catalog folder as shown in the form, with its checkbox state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderChoice {
    pub folder: Folder,
    pub selected: bool,
}

/// Create/edit form for a single workspace.
pub struct WorkspaceEditor {
    mode: EditorMode,
    catalog: FolderCatalog,
    store: Arc<dyn WorkspaceStore>,
    ids: Arc<dyn WorkspaceIdGenerator>,
    on_back: BackCallback,
    name: String,
    selected_folder_ids: Vec<FolderId>,
    phase: EditorPhase,
}

impl WorkspaceEditor {
    pub fn new(
        mode: EditorMode,
        catalog: FolderCatalog,
        store: Arc<dyn WorkspaceStore>,
        ids: Arc<dyn WorkspaceIdGenerator>,
        on_back: BackCallback,
    ) -> Self {
        Self {
            mode,
            catalog,
            store,
            ids,
            on_back,
            name: String::new(),
            selected_folder_ids: Vec::new(),
            phase: EditorPhase::Idle,
        }
    }

    /// Resets the form and pre-fills it from the store in edit mode.
    ///
    /// An edit id that no longer exists leaves the form blank.
    pub async fn load(&mut self) {
        if self.phase == EditorPhase::Committed {
            return;
        }
        self.name.clear();
        self.selected_folder_ids.clear();

        if let EditorMode::Edit { workspace_id } = &self.mode {
            let saved = self.store.get_saved_workspaces().await;
            match saved.into_iter().find(|w| &w.id == workspace_id) {
                Some(workspace) => {
                    tracing::debug!("Editing workspace '{}' ({})", workspace.name, workspace.id);
                    self.name = workspace.name;
                    self.selected_folder_ids = workspace.folder_ids;
                }
                None => {
                    tracing::warn!("Workspace {} not found, editor left blank", workspace_id);
                }
            }
        }
        self.phase = EditorPhase::Editing;
    }

    /// Switches to another workspace id and reloads if it changed.
    pub async fn set_workspace_id(&mut self, workspace_id: Option<String>) {
        let mode = EditorMode::from_workspace_id(workspace_id);
        if mode == self.mode && self.phase != EditorPhase::Idle {
            return;
        }
        if self.phase == EditorPhase::Committed {
            return;
        }
        self.mode = mode;
        self.load().await;
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if self.phase == EditorPhase::Committed {
            return;
        }
        self.name = name.into();
        self.phase = EditorPhase::Editing;
    }

    /// Working selection in the order folders were picked.
    pub fn selected_folder_ids(&self) -> &[FolderId] {
        &self.selected_folder_ids
    }

    /// Adds `folder_id` at the end, or removes it if already selected.
    pub fn toggle_folder(&mut self, folder_id: FolderId) {
        if self.phase == EditorPhase::Committed {
            return;
        }
        match self.selected_folder_ids.iter().position(|id| *id == folder_id) {
            Some(index) => {
                self.selected_folder_ids.remove(index);
            }
            None => self.selected_folder_ids.push(folder_id),
        }
        self.phase = EditorPhase::Editing;
    }

    /// Catalog folders in display order with their checkbox state.
    pub fn folder_choices(&self) -> Vec<FolderChoice> {
        self.catalog
            .ordered_folders()
            .into_iter()
            .map(|folder| FolderChoice {
                selected: self.selected_folder_ids.contains(&folder.id),
                folder: folder.clone(),
            })
            .collect()
    }

    pub fn validation(&self) -> Validation {
        if self.name.trim().is_empty() {
            Validation::EmptyName
        } else if self.selected_folder_ids.is_empty() {
            Validation::NoFolders
        } else {
            Validation::Valid
        }
    }

    /// Whether the submit control should be enabled.
    pub fn is_valid(&self) -> bool {
        self.phase != EditorPhase::Committed && self.validation() == Validation::Valid
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Create Workspace",
            EditorMode::Edit { .. } => "Update Workspace",
        }
    }

    /// Commits the form to the store and closes the editor.
    ///
    /// Invalid or repeated submits return `Rejected` without touching the
    /// store. Editing an id that is no longer saved fails with `NotFound`.
    /// Once a new workspace is saved the editor is committed, even if making
    /// it current then fails.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        if self.phase == EditorPhase::Committed {
            return Ok(SubmitOutcome::Rejected(Rejection::AlreadyCommitted));
        }
        let validation = self.validation();
        if validation != Validation::Valid {
            tracing::debug!("Workspace form not submittable: {:?}", validation);
            return Ok(SubmitOutcome::Rejected(Rejection::Invalid(validation)));
        }

        let name = self.name.trim().to_string();
        let folder_ids = self.selected_folder_ids.clone();
        let mut saved = self.store.get_saved_workspaces().await;

        let outcome = match &self.mode {
            EditorMode::Create => {
                let id = generate_unique_id(self.ids.as_ref(), &saved)?;
                let workspace = Workspace::new(id, name, folder_ids);
                saved.push(workspace.clone());
                self.store.set_saved_workspaces(saved).await?;
                // The workspace exists from here on; a retry must not add it again.
                self.phase = EditorPhase::Committed;
                self.store
                    .set_current_selection(Selection::saved(workspace.id.clone()))
                    .await?;
                tracing::info!("Created workspace '{}' ({})", workspace.name, workspace.id);
                SubmitOutcome::Created(workspace)
            }
            EditorMode::Edit { workspace_id } => {
                let entry = saved
                    .iter_mut()
                    .find(|w| &w.id == workspace_id)
                    .ok_or_else(|| ChatspaceError::not_found("workspace", workspace_id.clone()))?;
                entry.name = name;
                entry.folder_ids = folder_ids;
                let workspace = entry.clone();
                self.store.set_saved_workspaces(saved).await?;
                tracing::info!("Updated workspace '{}' ({})", workspace.name, workspace.id);
                SubmitOutcome::Updated(workspace)
            }
        };

        self.phase = EditorPhase::Committed;
        (self.on_back)();
        Ok(outcome)
    }

    /// Leaves the editor without saving.
    pub fn back(&mut self) {
        (self.on_back)();
    }
}
