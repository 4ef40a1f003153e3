use std::path::{Path, PathBuf};

/// Well-known locations of the Claude Code session store.
///
/// The root is explicit configuration rather than a hidden global so the
/// enumeration code stays testable against temp directories.
#[derive(Debug, Clone)]
pub struct ClaudePaths {
    pub root: PathBuf,
    pub projects_dir: PathBuf,
}

impl ClaudePaths {
    /// Derive all paths from a store root. Pure computation, no I/O.
    pub fn discover(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            projects_dir: root.join("projects"),
            root,
        }
    }

    /// Store root from the `SAGA_CLAUDE_DIR` override, else `~/.claude`.
    pub fn from_env() -> Self {
        let root = std::env::var("SAGA_CLAUDE_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_root);
        Self::discover(root)
    }

    /// Session directory for a working directory:
    /// `projects/<slug>` where the slug is the absolute path with `/` → `-`.
    pub fn session_dir(&self, cwd: &Path) -> PathBuf {
        self.projects_dir.join(project_slug(cwd))
    }
}

/// `/home/user/repo` → `-home-user-repo`.
pub fn project_slug(path: &Path) -> String {
    path.to_string_lossy().replace('/', "-")
}

/// Best-effort inverse of [`project_slug`] for display when no index metadata
/// exists: `-home-user-repo` → `/home/user/repo`. Lossy for paths whose
/// components themselves contain `-`.
pub fn decode_slug(name: &str) -> String {
    format!("/{}", name.trim_start_matches('-').replace('-', "/"))
}

fn default_root() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        home.join(".claude")
    } else {
        PathBuf::from(".claude")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_encodes_separators() {
        assert_eq!(project_slug(Path::new("/home/user/repo")), "-home-user-repo");
    }

    #[test]
    fn decode_slug_round_trips_simple_paths() {
        assert_eq!(decode_slug("-home-user-repo"), "/home/user/repo");
    }

    #[test]
    fn session_dir_joins_slug_under_projects() {
        let paths = ClaudePaths::discover("/tmp/claude-root");
        let dir = paths.session_dir(Path::new("/home/user/repo"));
        assert_eq!(dir, Path::new("/tmp/claude-root/projects/-home-user-repo"));
    }

    #[test]
    fn discover_is_pure_path_derivation() {
        let paths = ClaudePaths::discover("/nonexistent");
        assert_eq!(paths.projects_dir, Path::new("/nonexistent/projects"));
    }
}
