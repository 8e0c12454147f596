pub mod action;
pub mod config;
pub mod error;
pub mod folder;
pub mod workspace;

// Re-export common error type
pub use error::ChatspaceError;
