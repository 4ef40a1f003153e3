use serde::Deserialize;

/// One line of a session JSONL file.
///
/// Expected shape:
/// ```json
/// {"type":"user","timestamp":"2026-02-14T03:42:00Z","message":{"role":"user","content":"hello"}}
/// {"type":"assistant","message":{"role":"assistant","id":"msg_1","content":[{"type":"text","text":"hi"}]}}
/// ```
///
/// Only `user` and `assistant` records matter for reconstruction; every other
/// `type` is carried through parsing and ignored downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub message: Option<MessageBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<Content>,
}

/// Message content: a plain string for user turns, an ordered block list for
/// assistant turns. Anything else is preserved but never rendered.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Blocks(Vec<ContentBlock>),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// Parse one raw line. Blank and malformed lines yield `None`; a bad line
/// never aborts a run.
pub fn parse_line(line: &str) -> Option<LogRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    serde_json::from_str(line).ok()
}
