use std::path::{Path, PathBuf};

use crate::reconstruct::reconstruct;
use crate::render::render_markdown;

/// Outcomes an export caller is expected to branch on.
///
/// Batch exporters report these per file and keep going; nothing here aborts
/// a run of remaining inputs.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("no messages in transcript")]
    Empty,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reconstruct `jsonl_path` and write the rendered Markdown to `output_path`.
///
/// Returns the number of logical messages rendered. Nothing is written for a
/// missing input or an empty transcript.
pub fn export_to_markdown(jsonl_path: &Path, output_path: &Path) -> Result<usize, ExportError> {
    if !jsonl_path.exists() {
        return Err(ExportError::NotFound(jsonl_path.to_path_buf()));
    }

    let content = std::fs::read_to_string(jsonl_path)?;
    let messages = reconstruct(content.lines());
    if messages.is_empty() {
        return Err(ExportError::Empty);
    }

    let session_id = jsonl_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("session");
    let doc = render_markdown(&messages, session_id);
    std::fs::write(output_path, doc)?;

    Ok(messages.len())
}
