use anyhow::{Result, bail};
use chatspace_application::{EditorMode, SubmitOutcome, WorkspaceEditor};
use chatspace_core::folder::FolderId;
use chatspace_core::workspace::{Selection, Workspace, WorkspaceStore};

use super::Context;

fn describe(context: &Context, workspace: &Workspace) -> String {
    if workspace.is_everything() {
        return "all folders".to_string();
    }
    let mut titles: Vec<String> = workspace
        .resolved_folders(&context.catalog)
        .into_iter()
        .map(|f| f.title.clone())
        .collect();
    let dangling = workspace.dangling_folder_ids(&context.catalog);
    if !dangling.is_empty() {
        titles.push(format!("missing {:?}", dangling));
    }
    titles.join(", ")
}

pub async fn list(context: &Context) {
    for entry in context.switcher().entries().await {
        let marker = if entry.is_active { "*" } else { " " };
        println!(
            "{} {:<16} {:<20} {}",
            marker,
            entry.workspace.id,
            entry.workspace.name,
            describe(context, &entry.workspace)
        );
    }
}

pub async fn current(context: &Context) {
    let workspace = context.switcher().selected_workspace().await;
    println!(
        "{} ({}): {}",
        workspace.name,
        workspace.id,
        describe(context, &workspace)
    );
}

pub async fn select(context: &Context, id: &str) -> Result<()> {
    let selection = if id.eq_ignore_ascii_case("everything") {
        Selection::Everything
    } else {
        Selection::from_legacy_id(id)
    };
    if let Selection::Saved(saved_id) = &selection {
        let saved = context.store.get_saved_workspaces().await;
        if !saved.iter().any(|w| &w.id == saved_id) {
            bail!("workspace {} not found", saved_id);
        }
    }

    let switcher = context.switcher();
    switcher.select(selection).await?;
    println!("Now in {}", switcher.trigger_label().await);
    Ok(())
}

fn editor(context: &Context, mode: EditorMode) -> WorkspaceEditor {
    WorkspaceEditor::new(
        mode,
        context.catalog.clone(),
        context.store.clone(),
        context.ids.clone(),
        Box::new(|| {}),
    )
}

/// Drops repeated folder ids so each one is toggled once.
fn unique_folders(folders: Vec<FolderId>) -> Vec<FolderId> {
    let mut unique = Vec::with_capacity(folders.len());
    for folder in folders {
        if !unique.contains(&folder) {
            unique.push(folder);
        }
    }
    unique
}

fn report(outcome: SubmitOutcome) -> Result<()> {
    match outcome {
        SubmitOutcome::Created(workspace) => {
            println!("Created {} ({})", workspace.name, workspace.id);
        }
        SubmitOutcome::Updated(workspace) => {
            println!("Updated {} ({})", workspace.name, workspace.id);
        }
        SubmitOutcome::Rejected(reason) => bail!("not saved: {:?}", reason),
    }
    Ok(())
}

pub async fn create(context: &Context, name: String, folders: Vec<FolderId>) -> Result<()> {
    let mut editor = editor(context, EditorMode::Create);
    editor.load().await;
    editor.set_name(name);
    for folder in unique_folders(folders) {
        editor.toggle_folder(folder);
    }
    report(editor.submit().await?)
}

pub async fn edit(
    context: &Context,
    id: String,
    name: Option<String>,
    folders: Vec<FolderId>,
) -> Result<()> {
    let saved = context.store.get_saved_workspaces().await;
    if !saved.iter().any(|w| w.id == id) {
        bail!("workspace {} not found", id);
    }

    let mut editor = editor(context, EditorMode::Edit { workspace_id: id });
    editor.load().await;
    if let Some(name) = name {
        editor.set_name(name);
    }
    if !folders.is_empty() {
        for folder in editor.selected_folder_ids().to_vec() {
            editor.toggle_folder(folder);
        }
        for folder in unique_folders(folders) {
            editor.toggle_folder(folder);
        }
    }
    report(editor.submit().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatspace_core::config::ChatspaceConfig;
    use chatspace_infrastructure::ChatspacePaths;

    #[test]
    fn test_unique_folders_keeps_first_occurrence() {
        assert_eq!(unique_folders(vec![1, 3, 1, 2, 3]), vec![1, 3, 2]);
        assert!(unique_folders(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn test_create_with_repeated_folder() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = ChatspacePaths::new(Some(temp_dir.path().into()));
        let context = Context::open(&paths, &ChatspaceConfig::default()).unwrap();

        create(&context, "Work".to_string(), vec![1, 1]).await.unwrap();

        let saved = context.store.get_saved_workspaces().await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].folder_ids, vec![1]);
    }
}
