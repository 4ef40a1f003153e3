use saga_probe::active_session_ids;
use saga_store::{format_size, list_sessions, ClaudePaths};

use crate::util;

/// List the sessions of the current project, newest first.
pub fn execute(paths: &ClaudePaths) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let session_dir = paths.session_dir(&cwd);
    let sessions = list_sessions(&session_dir);
    if sessions.is_empty() {
        println!("No sessions in: {}", session_dir.display());
        return Ok(());
    }

    let active = active_session_ids(paths);

    println!("Sessions in: {}\n", session_dir.display());
    for (i, s) in sessions.iter().enumerate() {
        let status = if active.iter().any(|id| *id == s.session_id) {
            " ACTIVE"
        } else {
            ""
        };
        let prompt = s.first_prompt.as_deref().unwrap_or("(no prompt)");
        let date = util::format_mtime(s.modified);
        let size = format_size(s.size);
        let msgs = s
            .message_count
            .map(|n| format!(", {n} msg"))
            .unwrap_or_default();
        println!("  [{}]{status} {date}  {size}{msgs}", i + 1);
        println!("      {prompt}");
        if let Some(summary) = &s.summary {
            println!("      -> {summary}");
        }
        println!();
    }
    Ok(())
}
