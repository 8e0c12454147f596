//! Application layer for chatspace.
//!
//! The switcher and the editor coordinate the workspace store, the folder
//! catalog and the host's action dispatcher. Rendering is left to the host.

pub mod editor;
pub mod switcher;

pub use editor::{
    BackCallback, EditorMode, EditorPhase, FolderChoice, Rejection, SubmitOutcome, Validation,
    WorkspaceEditor,
};
pub use switcher::{SwitcherEntry, WorkspaceSwitcher};
