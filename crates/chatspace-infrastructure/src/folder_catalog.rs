//! Folder catalog file loader.
//!
//! Hosts that cannot hand the catalog over in-process export it as TOML:
//!
//! ```toml
//! [[folders]]
//! id = 2
//! title = "Work"
//! ```
//!
//! Entry order is display order.

use std::path::Path;

use chatspace_core::error::Result;
use chatspace_core::folder::{Folder, FolderCatalog};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
struct FolderCatalogFile {
    #[serde(default)]
    folders: Vec<Folder>,
}

/// Parses a catalog from TOML text.
pub fn parse_folder_catalog(content: &str) -> Result<FolderCatalog> {
    let file: FolderCatalogFile = toml::from_str(content)?;
    Ok(FolderCatalog::from_folders(file.folders))
}

/// Loads the catalog at `path`; a missing file yields an empty catalog.
pub fn load_folder_catalog(path: &Path) -> Result<FolderCatalog> {
    if !path.exists() {
        tracing::warn!(
            "Folder catalog {} not found, using an empty catalog",
            path.display()
        );
        return Ok(FolderCatalog::default());
    }
    let content = std::fs::read_to_string(path)?;
    let catalog = parse_folder_catalog(&content)?;
    tracing::debug!("Loaded {} folder(s) from {}", catalog.len(), path.display());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_keeps_file_order() {
        let catalog = parse_folder_catalog(
            r#"
[[folders]]
id = 5
title = "Work"

[[folders]]
id = 2
title = "Family"
"#,
        )
        .unwrap();

        let titles: Vec<&str> = catalog
            .ordered_folders()
            .iter()
            .map(|f| f.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Work", "Family"]);
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        let err = parse_folder_catalog("[[folders]]\nid = \"x\"").unwrap_err();
        assert!(err.to_string().contains("TOML"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = load_folder_catalog(&temp_dir.path().join("folders.toml")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("folders.toml");
        std::fs::write(&path, "[[folders]]\nid = 1\ntitle = \"Bots\"\n").unwrap();

        let catalog = load_folder_catalog(&path).unwrap();
        assert_eq!(catalog.get(1).map(|f| f.title.as_str()), Some("Bots"));
    }
}
