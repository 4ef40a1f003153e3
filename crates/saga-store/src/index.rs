use std::path::Path;

use serde::Deserialize;

/// `sessions-index.json` as Claude Code writes it next to the session files.
/// Everything in it is advisory; a missing or malformed index is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsIndex {
    #[serde(default)]
    pub original_path: Option<String>,
    #[serde(default)]
    pub entries: Vec<SessionsIndexEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsIndexEntry {
    pub session_id: String,
    #[serde(default)]
    pub first_prompt: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub message_count: Option<u64>,
}

impl SessionsIndex {
    pub fn entry(&self, session_id: &str) -> Option<&SessionsIndexEntry> {
        self.entries.iter().find(|e| e.session_id == session_id)
    }
}

/// Read the index from a project directory, if there is a readable one.
pub fn read_sessions_index(project_dir: &Path) -> Option<SessionsIndex> {
    let index_path = project_dir.join("sessions-index.json");
    let content = std::fs::read_to_string(&index_path).ok()?;
    match serde_json::from_str(&content) {
        Ok(index) => Some(index),
        Err(err) => {
            tracing::debug!("ignoring malformed {}: {err}", index_path.display());
            None
        }
    }
}
