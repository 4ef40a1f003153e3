use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

/// File name for console output; never fails on odd paths.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("?")
        .to_string()
}

/// `SystemTime` → `2026-02-14 03:42` (UTC) for listings.
pub fn format_mtime(st: SystemTime) -> String {
    let dt = time::OffsetDateTime::from(st);
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}",
        dt.year(),
        u8::from(dt.month()),
        dt.day(),
        dt.hour(),
        dt.minute()
    )
}

/// Print `prompt`, read one trimmed line from stdin. EOF reads as empty,
/// which callers treat as cancel.
pub fn read_selection(prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut raw = String::new();
    std::io::stdin().read_line(&mut raw)?;
    Ok(raw.trim().to_string())
}

/// Parse a 1-based selection into an index. `Err` means the user typed
/// something that is not a valid choice; callers exit non-zero on it.
pub fn parse_selection(raw: &str, len: usize) -> anyhow::Result<usize> {
    let choice: usize = raw
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid choice: {raw}"))?;
    if choice == 0 || choice > len {
        anyhow::bail!("invalid number: {choice} (expected 1-{len})");
    }
    Ok(choice - 1)
}
