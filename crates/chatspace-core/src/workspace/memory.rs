//! In-memory workspace store.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::model::{Selection, Workspace, WorkspaceState, validate_saved_workspaces};
use super::repository::WorkspaceStore;
use crate::error::Result;

/// Workspace store that lives only as long as the process.
///
/// Used as the store for tests and for hosts that persist state themselves.
#[derive(Debug, Default)]
pub struct InMemoryWorkspaceStore {
    state: Mutex<WorkspaceState>,
}

impl InMemoryWorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from `state`, minus saved entries with a reserved or repeated id.
    pub fn with_state(mut state: WorkspaceState) -> Self {
        state.drop_unusable_workspaces();
        Self {
            state: Mutex::new(state),
        }
    }
}

#[async_trait]
impl WorkspaceStore for InMemoryWorkspaceStore {
    async fn get_saved_workspaces(&self) -> Vec<Workspace> {
        self.state.lock().await.saved_workspaces.clone()
    }

    async fn set_saved_workspaces(&self, workspaces: Vec<Workspace>) -> Result<()> {
        validate_saved_workspaces(&workspaces)?;
        self.state.lock().await.saved_workspaces = workspaces;
        Ok(())
    }

    async fn get_current_selection(&self) -> Selection {
        self.state.lock().await.current.clone()
    }

    async fn set_current_selection(&self, selection: Selection) -> Result<()> {
        self.state.lock().await.current = selection;
        Ok(())
    }

    async fn get_state(&self) -> WorkspaceState {
        self.state.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = InMemoryWorkspaceStore::new();
        assert!(store.get_saved_workspaces().await.is_empty());
        assert_eq!(store.get_current_selection().await, Selection::Everything);
    }

    #[tokio::test]
    async fn test_writes_are_visible_to_reads() {
        let store = InMemoryWorkspaceStore::new();
        store
            .set_saved_workspaces(vec![Workspace::new("1", "Work", vec![3])])
            .await
            .unwrap();
        store
            .set_current_selection(Selection::saved("1"))
            .await
            .unwrap();

        let state = store.get_state().await;
        assert_eq!(state.saved_workspaces.len(), 1);
        assert_eq!(state.current, Selection::saved("1"));
        assert_eq!(state.current_workspace().name, "Work");
    }

    #[tokio::test]
    async fn test_with_state() {
        let store = InMemoryWorkspaceStore::with_state(WorkspaceState {
            saved_workspaces: vec![Workspace::new("7", "News", vec![1])],
            current: Selection::saved("missing"),
        });
        assert_eq!(store.get_saved_workspaces().await[0].id, "7");
        assert_eq!(
            store.get_current_selection().await,
            Selection::saved("missing")
        );
    }

    #[tokio::test]
    async fn test_rejects_reserved_ids() {
        let store = InMemoryWorkspaceStore::new();
        let err = store
            .set_saved_workspaces(vec![Workspace::new("0", "Shadow", vec![1])])
            .await
            .unwrap_err();

        assert!(matches!(err, crate::error::ChatspaceError::Validation(_)));
        assert!(store.get_saved_workspaces().await.is_empty());
    }

    #[tokio::test]
    async fn test_with_state_drops_reserved_ids() {
        let store = InMemoryWorkspaceStore::with_state(WorkspaceState {
            saved_workspaces: vec![
                Workspace::new("0", "Shadow", vec![1]),
                Workspace::new("7", "News", vec![1]),
            ],
            current: Selection::Everything,
        });
        let saved = store.get_saved_workspaces().await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, "7");
    }
}
