pub mod folders;
pub mod workspace;

use std::sync::Arc;

use anyhow::Result;
use chatspace_application::WorkspaceSwitcher;
use chatspace_core::action::ChannelDispatcher;
use chatspace_core::config::ChatspaceConfig;
use chatspace_core::folder::FolderCatalog;
use chatspace_core::workspace::WorkspaceIdGenerator;
use chatspace_infrastructure::{ChatspacePaths, FileWorkspaceStore, load_folder_catalog};

/// Everything a command needs, opened once per invocation.
pub struct Context {
    pub store: Arc<FileWorkspaceStore>,
    pub catalog: FolderCatalog,
    pub ids: Arc<dyn WorkspaceIdGenerator>,
}

impl Context {
    pub fn open(paths: &ChatspacePaths, config: &ChatspaceConfig) -> Result<Self> {
        let store = Arc::new(FileWorkspaceStore::new(paths)?);
        let catalog = load_folder_catalog(&paths.folders_file()?)?;
        let ids: Arc<dyn WorkspaceIdGenerator> = Arc::from(config.id_strategy.build());
        Ok(Self {
            store,
            catalog,
            ids,
        })
    }

    /// A switcher whose actions go nowhere; the CLI has no pages to open.
    pub fn switcher(&self) -> WorkspaceSwitcher {
        let (dispatcher, _actions) = ChannelDispatcher::new();
        WorkspaceSwitcher::new(self.store.clone(), Arc::new(dispatcher))
    }
}
