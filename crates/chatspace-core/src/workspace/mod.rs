pub mod id_generator;
pub mod memory;
pub mod model;
pub mod repository;

pub use id_generator::{
    IdStrategy, SequenceIdGenerator, TimestampIdGenerator, UuidIdGenerator,
    WorkspaceIdGenerator, generate_unique_id,
};
pub use memory::InMemoryWorkspaceStore;
pub use model::{
    EVERYTHING_WORKSPACE_ID, EVERYTHING_WORKSPACE_NAME, Selection, Workspace, WorkspaceState,
    validate_saved_workspaces,
};
pub use repository::WorkspaceStore;
