use std::path::Path;

use saga_store::{export_destination, list_sessions, ClaudePaths};

use crate::cmd_export::export_one;

/// Export every session of the current project. One bad file never aborts
/// the batch; the tally says what actually happened.
pub fn execute(paths: &ClaudePaths, output_dir: &Path) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let session_dir = paths.session_dir(&cwd);
    let sessions = list_sessions(&session_dir);
    if sessions.is_empty() {
        println!("No sessions in: {}", session_dir.display());
        return Ok(());
    }

    println!("Exporting {} sessions...\n", sessions.len());
    let mut exported = 0;
    for s in &sessions {
        match export_destination(&s.path, output_dir) {
            Ok(dest) => {
                if export_one(&s.path, &dest) {
                    exported += 1;
                }
            }
            Err(err) => eprintln!("  Failed to prepare output for {}: {err}", s.session_id),
        }
    }

    println!("\nDone. Exported {exported}/{} sessions.", sessions.len());
    Ok(())
}
