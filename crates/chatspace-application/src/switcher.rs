//! Workspace switcher
//!
//! Backs the dropdown that shows the current workspace and lets the user
//! pick another one or ask for a new one.

use std::sync::Arc;

use chatspace_core::action::{Action, ActionDispatcher};
use chatspace_core::error::Result;
use chatspace_core::workspace::{Selection, Workspace, WorkspaceStore};

/// One row of the switcher menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitcherEntry {
    pub workspace: Workspace,
    /// What selecting this row stores.
    pub selection: Selection,
    /// Whether this row is the workspace in effect.
    pub is_active: bool,
}

/// Selection logic for the workspace dropdown.
pub struct WorkspaceSwitcher {
    store: Arc<dyn WorkspaceStore>,
    dispatcher: Arc<dyn ActionDispatcher>,
}

impl WorkspaceSwitcher {
    pub fn new(store: Arc<dyn WorkspaceStore>, dispatcher: Arc<dyn ActionDispatcher>) -> Self {
        Self { store, dispatcher }
    }

    /// The workspace in effect; Everything when nothing valid is selected.
    pub async fn selected_workspace(&self) -> Workspace {
        self.store.get_state().await.current_workspace()
    }

    /// Text for the dropdown trigger.
    pub async fn trigger_label(&self) -> String {
        self.selected_workspace().await.name
    }

    /// Everything first, then saved workspaces in stored order.
    ///
    /// Exactly one entry is active. An orphaned selection marks Everything.
    pub async fn entries(&self) -> Vec<SwitcherEntry> {
        let state = self.store.get_state().await;
        let effective = state.current.effective(&state.saved_workspaces);

        std::iter::once(Workspace::everything())
            .chain(state.saved_workspaces)
            .map(|workspace| {
                let selection = Selection::from(&workspace);
                SwitcherEntry {
                    is_active: selection == effective,
                    workspace,
                    selection,
                }
            })
            .collect()
    }

    /// Makes `selection` current. No workspace is modified.
    pub async fn select(&self, selection: Selection) -> Result<()> {
        tracing::info!("Switching workspace to '{}'", selection.legacy_id());
        self.store.set_current_selection(selection).await
    }

    /// Convenience for selecting a menu row.
    pub async fn select_entry(&self, entry: &SwitcherEntry) -> Result<()> {
        self.select(entry.selection.clone()).await
    }

    /// Asks the host to open the editor in create mode.
    pub fn request_create(&self) {
        self.dispatcher.dispatch(Action::OpenWorkspaceCreator);
    }

    /// Asks the host to open the editor for `workspace_id`.
    pub fn request_edit(&self, workspace_id: impl Into<String>) {
        self.dispatcher.dispatch(Action::OpenWorkspaceEditor {
            workspace_id: workspace_id.into(),
        });
    }
}
