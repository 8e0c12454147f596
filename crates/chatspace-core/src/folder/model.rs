//! Chat folders as seen from the workspace layer.
//!
//! Folders belong to the host chat client. This crate only reads them, so the
//! catalog is a plain snapshot handed to whoever needs it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of a chat folder in the host application.
pub type FolderId = i32;

/// A chat folder owned by the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub title: String,
}

impl Folder {
    pub fn new(id: FolderId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Read-only snapshot of the host's folder list.
///
/// Mirrors the host layout: a lookup table plus the display order. The two
/// may disagree (an ordered id without an entry); iteration skips such ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderCatalog {
    by_id: HashMap<FolderId, Folder>,
    ordered_ids: Vec<FolderId>,
}

impl FolderCatalog {
    pub fn new(by_id: HashMap<FolderId, Folder>, ordered_ids: Vec<FolderId>) -> Self {
        Self { by_id, ordered_ids }
    }

    /// Builds a catalog whose order is the iteration order of `folders`.
    pub fn from_folders(folders: impl IntoIterator<Item = Folder>) -> Self {
        let mut by_id = HashMap::new();
        let mut ordered_ids = Vec::new();
        for folder in folders {
            if by_id.contains_key(&folder.id) {
                continue;
            }
            ordered_ids.push(folder.id);
            by_id.insert(folder.id, folder);
        }
        Self { by_id, ordered_ids }
    }

    pub fn get(&self, id: FolderId) -> Option<&Folder> {
        self.by_id.get(&id)
    }

    pub fn contains(&self, id: FolderId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Folders in display order, skipping ordered ids with no entry.
    pub fn ordered_folders(&self) -> Vec<&Folder> {
        self.ordered_ids
            .iter()
            .filter_map(|id| self.by_id.get(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ordered_folders().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_folders_keeps_order() {
        let catalog = FolderCatalog::from_folders(vec![
            Folder::new(5, "Work"),
            Folder::new(2, "Family"),
            Folder::new(9, "Bots"),
        ]);
        let ids: Vec<FolderId> = catalog.ordered_folders().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_from_folders_ignores_duplicate_ids() {
        let catalog =
            FolderCatalog::from_folders(vec![Folder::new(1, "First"), Folder::new(1, "Again")]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(1).map(|f| f.title.as_str()), Some("First"));
    }

    #[test]
    fn test_ordered_folders_skips_missing_entries() {
        let mut by_id = HashMap::new();
        by_id.insert(1, Folder::new(1, "Work"));
        let catalog = FolderCatalog::new(by_id, vec![1, 42]);

        let folders = catalog.ordered_folders();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].title, "Work");
        assert!(!catalog.contains(42));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = FolderCatalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.ordered_folders().is_empty());
    }
}
