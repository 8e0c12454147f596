//! File-backed workspace store.
//!
//! Keeps the saved workspaces and the current selection in one versioned
//! JSON file and serves reads from an in-memory copy.

use std::path::PathBuf;
use std::sync::Arc;

use chatspace_core::error::{ChatspaceError, Result};
use chatspace_core::workspace::{
    Selection, Workspace, WorkspaceState, WorkspaceStore, validate_saved_workspaces,
};
use tokio::sync::{Mutex, watch};
use version_migrate::{FileStorage, FileStorageStrategy, FormatStrategy, LoadBehavior};

use crate::dto::create_workspace_state_migrator;
use crate::paths::ChatspacePaths;

const ENTITY: &str = "workspace_state";

/// Workspace store persisted with version-migrate's `FileStorage`.
///
/// Every successful write is published to subscribers obtained from
/// [`FileWorkspaceStore::subscribe`].
///
/// # Example
///
/// ```ignore
/// use chatspace_infrastructure::FileWorkspaceStore;
///
/// let store = FileWorkspaceStore::open(path)?;
/// store.set_current_selection(Selection::saved("1700000000000")).await?;
/// let current = store.get_current_selection().await;
/// ```
#[derive(Clone)]
pub struct FileWorkspaceStore {
    /// Cached state; also serializes writers.
    state: Arc<Mutex<WorkspaceState>>,
    /// FileStorage instance for persistence.
    storage: Arc<Mutex<FileStorage>>,
    notifier: Arc<watch::Sender<WorkspaceState>>,
}

impl FileWorkspaceStore {
    /// Opens the store at the default `workspaces.json` location.
    pub fn new(paths: &ChatspacePaths) -> Result<Self> {
        Self::open(paths.workspaces_file()?)
    }

    /// Opens or creates the state file at `file_path`.
    ///
    /// Missing files are written with an empty state. Files in an older
    /// schema are migrated on load, and saved entries with a reserved or
    /// repeated id are skipped.
    pub fn open(file_path: PathBuf) -> Result<Self> {
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let migrator = create_workspace_state_migrator();

        let default_state = serde_json::to_value(WorkspaceState::default()).map_err(|e| {
            ChatspaceError::config(format!("Failed to serialize default WorkspaceState: {}", e))
        })?;

        let strategy = FileStorageStrategy::new()
            .with_format(FormatStrategy::Json)
            .with_load_behavior(LoadBehavior::SaveIfMissing)
            .with_default_value(default_state);

        let storage = FileStorage::new(file_path.clone(), migrator, strategy).map_err(|e| {
            ChatspaceError::data_access(format!(
                "Failed to open workspace file {}: {}",
                file_path.display(),
                e
            ))
        })?;

        let states: Vec<WorkspaceState> = storage.query(ENTITY).map_err(|e| {
            ChatspaceError::data_access(format!("Failed to query {}: {}", ENTITY, e))
        })?;
        let mut initial_state = states.into_iter().next().unwrap_or_default();
        for dropped in initial_state.drop_unusable_workspaces() {
            tracing::warn!(
                "Ignoring saved workspace '{}' with unusable id '{}'",
                dropped.name,
                dropped.id
            );
        }

        tracing::debug!(
            "Loaded {} saved workspace(s) from {}",
            initial_state.saved_workspaces.len(),
            file_path.display()
        );

        let (notifier, _) = watch::channel(initial_state.clone());

        Ok(Self {
            state: Arc::new(Mutex::new(initial_state)),
            storage: Arc::new(Mutex::new(storage)),
            notifier: Arc::new(notifier),
        })
    }

    /// Receives the full state after every successful write.
    pub fn subscribe(&self) -> watch::Receiver<WorkspaceState> {
        self.notifier.subscribe()
    }

    /// Applies `update` to a copy of the state, persists it, then publishes it.
    ///
    /// The cache is left untouched if persisting fails.
    async fn commit(&self, update: impl FnOnce(&mut WorkspaceState) + Send) -> Result<()> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        update(&mut next);

        let storage = self.storage.clone();
        let state_for_save = next.clone();
        tokio::task::spawn_blocking(move || {
            let mut storage = storage.blocking_lock();
            storage
                .update_and_save(ENTITY, vec![state_for_save])
                .map_err(|e| {
                    ChatspaceError::data_access(format!("Failed to save {}: {}", ENTITY, e))
                })
        })
        .await
        .map_err(|e| ChatspaceError::internal(format!("Failed to join task: {}", e)))??;

        *state = next.clone();
        drop(state);
        self.notifier.send_replace(next);
        Ok(())
    }
}

#[async_trait::async_trait]
impl WorkspaceStore for FileWorkspaceStore {
    async fn get_saved_workspaces(&self) -> Vec<Workspace> {
        self.state.lock().await.saved_workspaces.clone()
    }

    async fn set_saved_workspaces(&self, workspaces: Vec<Workspace>) -> Result<()> {
        validate_saved_workspaces(&workspaces)?;
        let count = workspaces.len();
        self.commit(move |state| state.saved_workspaces = workspaces).await?;
        tracing::debug!("Saved {} workspace(s)", count);
        Ok(())
    }

    async fn get_current_selection(&self) -> Selection {
        self.state.lock().await.current.clone()
    }

    async fn set_current_selection(&self, selection: Selection) -> Result<()> {
        self.commit(move |state| state.current = selection).await
    }

    async fn get_state(&self) -> WorkspaceState {
        self.state.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp_dir: &TempDir) -> FileWorkspaceStore {
        FileWorkspaceStore::open(temp_dir.path().join("workspaces.json")).unwrap()
    }

    #[tokio::test]
    async fn test_open_creates_empty_state() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        assert!(store.get_saved_workspaces().await.is_empty());
        assert_eq!(store.get_current_selection().await, Selection::Everything);
        assert!(temp_dir.path().join("workspaces.json").exists());
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = store_in(&temp_dir);
            store
                .set_saved_workspaces(vec![
                    Workspace::new("100", "Work", vec![2, 5]),
                    Workspace::new("200", "Home", vec![1]),
                ])
                .await
                .unwrap();
            store
                .set_current_selection(Selection::saved("200"))
                .await
                .unwrap();
        }

        let reopened = store_in(&temp_dir);
        let state = reopened.get_state().await;
        assert_eq!(state.saved_workspaces.len(), 2);
        assert_eq!(state.saved_workspaces[0].folder_ids, vec![2, 5]);
        assert_eq!(state.saved_workspaces[1].name, "Home");
        assert_eq!(state.current, Selection::saved("200"));
    }

    #[tokio::test]
    async fn test_subscribers_see_writes() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let mut receiver = store.subscribe();

        store
            .set_saved_workspaces(vec![Workspace::new("100", "Work", vec![1])])
            .await
            .unwrap();

        assert!(receiver.has_changed().unwrap());
        let seen = receiver.borrow_and_update().clone();
        assert_eq!(seen.saved_workspaces.len(), 1);
        assert_eq!(seen.current, Selection::Everything);
    }

    #[tokio::test]
    async fn test_new_uses_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ChatspacePaths::new(Some(temp_dir.path().join("nested")));
        let store = FileWorkspaceStore::new(&paths).unwrap();
        store
            .set_current_selection(Selection::saved("x"))
            .await
            .unwrap();

        assert!(paths.workspaces_file().unwrap().exists());
    }

    #[tokio::test]
    async fn test_open_migrates_v1_0_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("workspaces.json");
        std::fs::write(
            &path,
            r#"{
  "workspace_state": [
    {
      "version": "1.0.0",
      "savedWorkspaces": [
        {"id": "1700000000000", "name": "Work", "foldersIds": [2, 5]},
        {"id": "0", "name": "Shadow", "foldersIds": [1]}
      ],
      "currentWorkspaceId": "1700000000000"
    }
  ]
}"#,
        )
        .unwrap();

        let store = FileWorkspaceStore::open(path).unwrap();
        let state = store.get_state().await;

        assert_eq!(
            state.saved_workspaces,
            vec![Workspace::new("1700000000000", "Work", vec![2, 5])]
        );
        assert_eq!(state.current, Selection::saved("1700000000000"));
    }

    #[tokio::test]
    async fn test_rejects_reserved_ids() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let receiver = store.subscribe();

        let err = store
            .set_saved_workspaces(vec![Workspace::new("0", "Shadow", vec![1])])
            .await
            .unwrap_err();

        assert!(matches!(err, ChatspaceError::Validation(_)));
        assert!(store.get_saved_workspaces().await.is_empty());
        assert!(!receiver.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_cache_and_subscribers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("workspaces.json");
        let store = FileWorkspaceStore::open(path.clone()).unwrap();
        store
            .set_saved_workspaces(vec![Workspace::new("100", "Work", vec![1])])
            .await
            .unwrap();
        let receiver = store.subscribe();

        // A non-empty directory in place of the file makes the rename fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "").unwrap();

        let result = store
            .set_saved_workspaces(vec![Workspace::new("200", "Home", vec![2])])
            .await;

        assert!(result.is_err());
        assert_eq!(
            store.get_saved_workspaces().await,
            vec![Workspace::new("100", "Work", vec![1])]
        );
        assert!(!receiver.has_changed().unwrap());
    }
}
