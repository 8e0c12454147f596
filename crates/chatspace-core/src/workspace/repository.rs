//! Workspace store trait.
//!
//! Defines the interface the switcher and editor use to read and write
//! saved workspaces and the current selection.

use async_trait::async_trait;

use super::model::{Selection, Workspace, WorkspaceState};
use crate::error::Result;

/// Persistent home of saved workspaces and the current selection.
///
/// Reads are answered from memory and cannot fail. Writes replace the whole
/// value and are visible to the next read on the same store.
///
/// # Implementation Notes
///
/// There is no compare-and-swap: a caller that reads the list, edits it and
/// writes it back can lose a concurrent writer's change. Callers are
/// expected to be a single UI thread.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// Returns saved workspaces in insertion order.
    async fn get_saved_workspaces(&self) -> Vec<Workspace>;

    /// Replaces the whole saved list.
    async fn set_saved_workspaces(&self, workspaces: Vec<Workspace>) -> Result<()>;

    /// Returns the stored selection, which may be orphaned.
    async fn get_current_selection(&self) -> Selection;

    async fn set_current_selection(&self, selection: Selection) -> Result<()>;

    /// Returns both values at once.
    async fn get_state(&self) -> WorkspaceState {
        WorkspaceState {
            saved_workspaces: self.get_saved_workspaces().await,
            current: self.get_current_selection().await,
        }
    }
}
