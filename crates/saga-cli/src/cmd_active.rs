use std::path::Path;

use saga_probe::{detect_active_sessions, ActiveSession};
use saga_store::{export_destination, ClaudePaths};

use crate::cmd_export::export_one;
use crate::util;

/// Show running sessions and export the selected one. A single exportable
/// session is selected automatically; empty input cancels.
pub fn execute(paths: &ClaudePaths, output_dir: &Path) -> anyhow::Result<()> {
    let active = detect_active_sessions(paths);
    if active.is_empty() {
        println!("No active Claude Code sessions.");
        return Ok(());
    }

    println!("Active Claude Code sessions ({}):\n", active.len());
    let mut exportable: Vec<&ActiveSession> = Vec::new();
    for (i, s) in active.iter().enumerate() {
        let prompt = s.first_prompt.as_deref().unwrap_or("(no prompt)");
        let resumed = if s.resumed { " (resumed)" } else { "" };
        println!("  [{}] PID {}{resumed}", i + 1, s.pid);
        println!("      Directory: {}", s.cwd.display());
        println!("      Prompt:    {prompt}");
        if let Some(file) = &s.session_file {
            println!("      File:      {}", util::file_name(file));
            exportable.push(s);
        }
        println!();
    }

    if exportable.is_empty() {
        println!("No files to export.");
        return Ok(());
    }

    let selected: Vec<&ActiveSession> = if exportable.len() == 1 {
        vec![exportable[0]]
    } else {
        let raw = util::read_selection(&format!(
            "Export which? [1-{}, a=all, Enter=cancel]: ",
            exportable.len()
        ))?;
        if raw.is_empty() {
            return Ok(());
        }
        if raw.eq_ignore_ascii_case("a") {
            exportable
        } else {
            let idx = util::parse_selection(&raw, exportable.len())?;
            vec![exportable[idx]]
        }
    };

    for s in selected {
        // Guarded by the session_file push above.
        let Some(file) = &s.session_file else {
            continue;
        };
        match export_destination(file, output_dir) {
            Ok(dest) => {
                export_one(file, &dest);
            }
            Err(err) => eprintln!("  Failed to prepare output for {}: {err}", file.display()),
        }
    }
    Ok(())
}
