use std::path::Path;

use saga_store::{export_destination, latest_session, ClaudePaths};
use saga_transcript::{export_to_markdown, ExportError};

use crate::util;

/// Default run: export the newest session of the current project.
pub fn newest(paths: &ClaudePaths, output_dir: &Path) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let session_dir = paths.session_dir(&cwd);
    if !session_dir.is_dir() {
        anyhow::bail!("session directory not found: {}", session_dir.display());
    }
    let Some(jsonl) = latest_session(&session_dir) else {
        anyhow::bail!("no session files in: {}", session_dir.display());
    };

    println!("Latest session: {}", util::file_name(&jsonl));
    let dest = export_destination(&jsonl, output_dir)?;
    export_one(&jsonl, &dest);
    Ok(())
}

/// Convert one explicitly named file. A second positional wins over the
/// output-path scheme.
pub fn single(file: &Path, output: Option<&Path>, output_dir: &Path) -> anyhow::Result<()> {
    let dest = match output {
        Some(out) => out.to_path_buf(),
        None => export_destination(file, output_dir)?,
    };
    export_one(file, &dest);
    Ok(())
}

/// Export one file and print the outcome. Failures are reported, never
/// propagated: batch callers keep going and tally.
pub fn export_one(jsonl: &Path, dest: &Path) -> bool {
    match export_to_markdown(jsonl, dest) {
        Ok(count) => {
            println!("  Saved: {} ({count} messages)", dest.display());
            true
        }
        Err(ExportError::NotFound(path)) => {
            println!("  File not found: {}", path.display());
            false
        }
        Err(ExportError::Empty) => {
            println!("  No messages in: {}", util::file_name(jsonl));
            false
        }
        Err(ExportError::Io(err)) => {
            eprintln!("  Failed to write {}: {err}", dest.display());
            false
        }
    }
}
