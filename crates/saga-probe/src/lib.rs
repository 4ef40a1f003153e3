//! Best-effort detection of running Claude Code sessions.
//!
//! Scans the process table for `claude` processes, resolves each one's
//! working directory (`/proc/<pid>/cwd` on Linux, `lsof` on macOS), and maps
//! it to the session file the process is most likely appending to: the
//! `--resume` argument when present, else the most recently modified session
//! file of the encoded project directory.
//!
//! Everything here degrades to an empty result. A machine without `ps`, a
//! PID we may not inspect, or a process with no session directory simply
//! contributes nothing; exporting must keep working without the probe.

use std::path::PathBuf;
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use saga_store::{first_prompt, latest_session, ClaudePaths};

static RESUME_ARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--resume\s+([a-f0-9-]+)").unwrap());

/// A running session and the best-guess log file behind it.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub pid: String,
    pub cwd: PathBuf,
    pub session_id: Option<String>,
    pub session_file: Option<PathBuf>,
    pub first_prompt: Option<String>,
    pub resumed: bool,
}

/// Detect active sessions by inspecting the process table.
pub fn detect_active_sessions(paths: &ClaudePaths) -> Vec<ActiveSession> {
    let Some(output) = ps_output() else {
        return Vec::new();
    };
    scan_ps_output(&output, paths, process_cwd)
}

/// Session ids of all currently active sessions, for flagging listings.
pub fn active_session_ids(paths: &ClaudePaths) -> Vec<String> {
    detect_active_sessions(paths)
        .into_iter()
        .filter_map(|s| s.session_id)
        .collect()
}

fn ps_output() -> Option<String> {
    let output = Command::new("ps").arg("aux").output().ok()?;
    if !output.status.success() {
        tracing::debug!("ps aux exited with {}", output.status);
        return None;
    }
    String::from_utf8(output.stdout).ok()
}

/// Core of the probe, with the per-PID cwd lookup injected so it can be
/// exercised against a canned process table.
fn scan_ps_output(
    ps_output: &str,
    paths: &ClaudePaths,
    cwd_of: impl Fn(&str) -> Option<PathBuf>,
) -> Vec<ActiveSession> {
    let mut active = Vec::new();

    for line in ps_output.lines() {
        if !is_claude_process(line) {
            continue;
        }
        let Some(pid) = line.split_whitespace().nth(1) else {
            continue;
        };
        let Some(cwd) = cwd_of(pid) else {
            continue;
        };

        let session_dir = paths.session_dir(&cwd);
        let resume_id = resume_id(line);

        let mut session_file = resume_id
            .as_ref()
            .map(|id| session_dir.join(format!("{id}.jsonl")))
            .filter(|p| p.exists());
        if session_file.is_none() {
            session_file = latest_session(&session_dir);
        }

        let session_id = session_file
            .as_ref()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .map(str::to_string);

        active.push(ActiveSession {
            pid: pid.to_string(),
            first_prompt: session_file.as_ref().and_then(|p| first_prompt(p, 80)),
            resumed: resume_id.is_some(),
            session_id,
            session_file,
            cwd,
        });
    }

    active
}

fn is_claude_process(ps_line: &str) -> bool {
    let lower = ps_line.to_lowercase();
    lower.contains("claude") && !lower.contains("grep") && !lower.contains("saga")
}

/// Extract the session id pinned by a `--resume <uuid>` argument.
fn resume_id(cmdline: &str) -> Option<String> {
    RESUME_ARG.captures(cmdline).map(|c| c[1].to_string())
}

/// Working directory of a process.
///
/// Directories under the store itself are rejected: a process whose cwd is
/// inside `.claude` is tooling, not a coding session.
#[cfg(target_os = "linux")]
fn process_cwd(pid: &str) -> Option<PathBuf> {
    let path = std::fs::read_link(format!("/proc/{pid}/cwd")).ok()?;
    if path.is_dir() && !path.to_string_lossy().contains(".claude") {
        Some(path)
    } else {
        None
    }
}

#[cfg(target_os = "macos")]
fn process_cwd(pid: &str) -> Option<PathBuf> {
    let output = Command::new("lsof").args(["-p", pid, "-Fn"]).output().ok()?;
    let stdout = String::from_utf8(output.stdout).ok()?;
    for line in stdout.lines() {
        if let Some(path) = line.strip_prefix("n/") {
            let path = PathBuf::from(format!("/{path}"));
            if path.is_dir() && !path.to_string_lossy().contains(".claude") {
                return Some(path);
            }
        }
    }
    None
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn process_cwd(_pid: &str) -> Option<PathBuf> {
    None
}
