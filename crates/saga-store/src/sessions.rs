use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use saga_transcript::{parse_line, Content};

use crate::index::read_sessions_index;

/// One exportable session, with whatever metadata the index or the file
/// itself can supply.
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub session_id: String,
    pub path: PathBuf,
    pub modified: SystemTime,
    pub size: u64,
    pub first_prompt: Option<String>,
    pub summary: Option<String>,
    pub message_count: Option<u64>,
}

/// All `.jsonl` session files directly in `dir`, most recently modified
/// first. Subagent files (`agent-*.jsonl`) are not sessions.
pub fn session_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "jsonl"))
        .filter(|p| {
            !p.file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|s| s.starts_with("agent-"))
        })
        .collect();
    files.sort_by_key(|p| std::cmp::Reverse(mtime(p)));
    files
}

/// The most recently modified session file in `dir`, the best guess for the
/// one a live session is appending to.
pub fn latest_session(dir: &Path) -> Option<PathBuf> {
    session_files(dir).into_iter().next()
}

/// Enumerate the sessions of one project directory, most recent first.
/// A missing directory is an empty listing, not an error.
pub fn list_sessions(dir: &Path) -> Vec<SessionEntry> {
    let index = read_sessions_index(dir);
    session_files(dir)
        .into_iter()
        .map(|path| {
            let session_id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            let meta = std::fs::metadata(&path).ok();
            let entry = index.as_ref().and_then(|i| i.entry(&session_id));
            SessionEntry {
                first_prompt: entry
                    .and_then(|e| e.first_prompt.clone())
                    .or_else(|| first_prompt(&path, 80)),
                summary: entry.and_then(|e| e.summary.clone()),
                message_count: entry.and_then(|e| e.message_count),
                modified: meta
                    .as_ref()
                    .and_then(|m| m.modified().ok())
                    .unwrap_or(SystemTime::UNIX_EPOCH),
                size: meta.map(|m| m.len()).unwrap_or(0),
                session_id,
                path,
            }
        })
        .collect()
}

/// Scan a session file for the first user prompt: the first `user` record
/// with non-blank string content, whitespace-collapsed and truncated to
/// `max_chars` with a `...` marker.
pub fn first_prompt(jsonl_path: &Path, max_chars: usize) -> Option<String> {
    let file = std::fs::File::open(jsonl_path).ok()?;
    let reader = BufReader::new(file);

    for line in reader.lines() {
        let line = line.ok()?;
        let Some(record) = parse_line(&line) else {
            continue;
        };
        if record.kind != "user" {
            continue;
        }
        let Some(Content::Text(text)) = record.message.and_then(|m| m.content) else {
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        return Some(if collapsed.chars().count() > max_chars {
            let truncated: String = collapsed.chars().take(max_chars).collect();
            format!("{truncated}...")
        } else {
            collapsed
        });
    }
    None
}

/// Human-readable file size for listings.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

fn mtime(path: &Path) -> SystemTime {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_session(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(f, "{line}").unwrap();
        }
        path
    }

    #[test]
    fn session_files_excludes_subagents_and_non_jsonl() {
        let tmp = tempfile::tempdir().unwrap();
        write_session(tmp.path(), "s1.jsonl", &[]);
        write_session(tmp.path(), "agent-x1.jsonl", &[]);
        write_session(tmp.path(), "notes.md", &[]);

        let files = session_files(tmp.path());

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("s1.jsonl"));
    }

    #[test]
    fn session_files_missing_dir_is_empty() {
        assert!(session_files(Path::new("/nonexistent/projects/dir")).is_empty());
    }

    #[test]
    fn first_prompt_collapses_whitespace_and_truncates() {
        let tmp = tempfile::tempdir().unwrap();
        let long = "word ".repeat(40);
        let path = write_session(
            tmp.path(),
            "s1.jsonl",
            &[
                r#"{"type":"summary","summary":"irrelevant"}"#,
                &format!(
                    r#"{{"type":"user","message":{{"role":"user","content":"  fix\n  the   bug {long}"}}}}"#
                ),
            ],
        );

        let prompt = first_prompt(&path, 80).unwrap();

        assert!(prompt.starts_with("fix the bug word"));
        assert!(prompt.ends_with("..."));
        assert_eq!(prompt.chars().count(), 83);
    }

    #[test]
    fn first_prompt_skips_blank_content() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_session(
            tmp.path(),
            "s1.jsonl",
            &[
                r#"{"type":"user","message":{"role":"user","content":"   "}}"#,
                r#"{"type":"user","message":{"role":"user","content":"real prompt"}}"#,
            ],
        );
        assert_eq!(first_prompt(&path, 80).as_deref(), Some("real prompt"));
    }

    #[test]
    fn list_sessions_prefers_index_metadata() {
        let tmp = tempfile::tempdir().unwrap();
        write_session(
            tmp.path(),
            "s1.jsonl",
            &[r#"{"type":"user","message":{"role":"user","content":"from the file"}}"#],
        );
        std::fs::write(
            tmp.path().join("sessions-index.json"),
            r#"{"entries":[{"sessionId":"s1","firstPrompt":"from the index","summary":"sum","messageCount":3}]}"#,
        )
        .unwrap();

        let sessions = list_sessions(tmp.path());

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].first_prompt.as_deref(), Some("from the index"));
        assert_eq!(sessions[0].summary.as_deref(), Some("sum"));
        assert_eq!(sessions[0].message_count, Some(3));
    }

    #[test]
    fn list_sessions_falls_back_to_file_scan() {
        let tmp = tempfile::tempdir().unwrap();
        write_session(
            tmp.path(),
            "s1.jsonl",
            &[r#"{"type":"user","message":{"role":"user","content":"from the file"}}"#],
        );

        let sessions = list_sessions(tmp.path());

        assert_eq!(sessions[0].first_prompt.as_deref(), Some("from the file"));
        assert!(sessions[0].summary.is_none());
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
