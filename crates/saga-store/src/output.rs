use std::path::{Path, PathBuf};

/// Project directory name a session file belongs to. Files under a
/// `subagents/` directory attribute to the owning project two levels up.
pub fn project_name_for(jsonl_path: &Path) -> String {
    let mut parent = jsonl_path.parent().unwrap_or(Path::new(""));
    if parent.file_name().is_some_and(|n| n == "subagents") {
        if let Some(grand) = parent.parent().and_then(|p| p.parent()) {
            parent = grand;
        }
    }
    parent
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown-project")
        .to_string()
}

/// Destination for an export: `<base>/<project-name>/<session-id>.md`.
/// Creates the project folder on demand.
pub fn export_destination(jsonl_path: &Path, base: &Path) -> anyhow::Result<PathBuf> {
    let session_id = jsonl_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("session");
    let folder = base.join(project_name_for(jsonl_path));
    std::fs::create_dir_all(&folder)?;
    Ok(folder.join(format!("{session_id}.md")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_name_is_parent_dir() {
        let name = project_name_for(Path::new("/store/projects/-home-user-repo/s1.jsonl"));
        assert_eq!(name, "-home-user-repo");
    }

    #[test]
    fn subagent_files_attribute_to_owning_project() {
        let name = project_name_for(Path::new(
            "/store/projects/-home-user-repo/s1/subagents/agent-x.jsonl",
        ));
        assert_eq!(name, "-home-user-repo");
    }

    #[test]
    fn destination_creates_project_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let jsonl = tmp.path().join("proj").join("s1.jsonl");
        std::fs::create_dir_all(jsonl.parent().unwrap()).unwrap();
        std::fs::write(&jsonl, "").unwrap();
        let base = tmp.path().join("export");

        let dest = export_destination(&jsonl, &base).unwrap();

        assert_eq!(dest, base.join("proj").join("s1.md"));
        assert!(dest.parent().unwrap().is_dir());
    }
}
