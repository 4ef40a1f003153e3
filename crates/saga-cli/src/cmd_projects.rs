use std::path::Path;

use saga_store::{
    export_destination, format_size, list_projects, session_files, ClaudePaths, ProjectEntry,
};

use crate::cmd_export::export_one;
use crate::util;

/// List every project in the store and export the selected one (or all).
pub fn execute(paths: &ClaudePaths, output_dir: &Path) -> anyhow::Result<()> {
    let projects = list_projects(paths);
    if projects.is_empty() {
        println!("No projects in: {}", paths.projects_dir.display());
        return Ok(());
    }

    println!("Claude Code projects ({}):\n", projects.len());
    for (i, p) in projects.iter().enumerate() {
        println!("  [{}] {}", i + 1, p.name);
        println!("      Path:     {}", p.original_path);
        println!(
            "      Sessions: {}  Size: {}  Latest: {}",
            p.session_count,
            format_size(p.total_size),
            util::format_mtime(p.latest_modified)
        );
        println!();
    }

    let raw = util::read_selection(&format!(
        "Export which? [1-{}, a=all, Enter=cancel]: ",
        projects.len()
    ))?;
    if raw.is_empty() {
        return Ok(());
    }
    let selected: Vec<&ProjectEntry> = if raw.eq_ignore_ascii_case("a") {
        projects.iter().collect()
    } else {
        let idx = util::parse_selection(&raw, projects.len())?;
        vec![&projects[idx]]
    };

    for p in selected {
        println!("\n--- {} ({} sessions) ---\n", p.name, p.session_count);
        let files = session_files(&p.dir);
        let mut exported = 0;
        for file in &files {
            match export_destination(file, output_dir) {
                Ok(dest) => {
                    if export_one(file, &dest) {
                        exported += 1;
                    }
                }
                Err(err) => eprintln!("  Failed to prepare output for {}: {err}", file.display()),
            }
        }
        println!("  Exported {exported}/{} sessions.", files.len());
    }

    println!("\nDone.");
    Ok(())
}
