use std::path::PathBuf;
use std::time::SystemTime;

use crate::index::read_sessions_index;
use crate::paths::{decode_slug, ClaudePaths};
use crate::sessions::session_files;

/// One project directory under the store, with aggregate session metadata.
#[derive(Debug, Clone)]
pub struct ProjectEntry {
    pub name: String,
    pub dir: PathBuf,
    pub session_count: usize,
    pub total_size: u64,
    pub latest_modified: SystemTime,
    /// The working directory the slug encodes, from the index when available.
    pub original_path: String,
}

/// Scan the projects root and list every project that has session files,
/// sorted by directory name.
pub fn list_projects(paths: &ClaudePaths) -> Vec<ProjectEntry> {
    let Ok(entries) = std::fs::read_dir(&paths.projects_dir) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    let mut projects = Vec::new();
    for dir in dirs {
        let files = session_files(&dir);
        if files.is_empty() {
            continue;
        }

        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let total_size: u64 = files
            .iter()
            .filter_map(|f| std::fs::metadata(f).ok())
            .map(|m| m.len())
            .sum();
        let latest_modified = files
            .iter()
            .filter_map(|f| std::fs::metadata(f).ok())
            .filter_map(|m| m.modified().ok())
            .max()
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let original_path = read_sessions_index(&dir)
            .and_then(|i| i.original_path)
            .unwrap_or_else(|| decode_slug(&name));

        projects.push(ProjectEntry {
            session_count: files.len(),
            total_size,
            latest_modified,
            original_path,
            name,
            dir,
        });
    }
    projects
}
