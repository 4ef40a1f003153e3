use std::collections::{HashMap, HashSet};

use crate::record::{parse_line, Content, LogRecord};

/// Conversational role. No third role is ever rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// A reconstructed, deduplicated conversational turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalMessage {
    pub role: Role,
    pub text: String,
    pub timestamp: Option<String>,
    /// Assigned at first observation, never reassigned by a revision.
    pub order: usize,
}

/// Reconstruct the logical conversation from raw JSONL lines, in file order.
///
/// A live session re-emits the same assistant message as more tokens stream
/// in, and resumed sessions replay user turns verbatim. Reconstruction
/// collapses both without losing chronological position:
///
/// - user records dedupe on exact text; the first occurrence keeps its slot
/// - assistant records group by `message.id`; a later record for a known id
///   replaces the text when it is at least as long (the final streamed
///   revision wins) and carries the timestamp with it
/// - assistant records without an id are each their own message
///
/// Output is ordered by first appearance. An empty result means the file had
/// no renderable conversation; callers treat that as a normal outcome.
pub fn reconstruct<'a, I>(lines: I) -> Vec<LogicalMessage>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut messages: Vec<LogicalMessage> = Vec::new();
    let mut seen_user_texts: HashSet<String> = HashSet::new();
    let mut assistant_by_id: HashMap<String, LogicalMessage> = HashMap::new();
    let mut order: usize = 0;

    for line in lines {
        let Some(record) = parse_line(line) else {
            continue;
        };
        match record.kind.as_str() {
            "user" => collect_user(&record, &mut messages, &mut seen_user_texts, &mut order),
            "assistant" => collect_assistant(&record, &mut assistant_by_id, &mut order),
            _ => {}
        }
    }

    messages.extend(assistant_by_id.into_values());
    messages.sort_by_key(|m| m.order);
    messages
}

fn collect_user(
    record: &LogRecord,
    messages: &mut Vec<LogicalMessage>,
    seen: &mut HashSet<String>,
    order: &mut usize,
) {
    let Some(msg) = record.message.as_ref() else {
        return;
    };
    if msg.role.as_deref() != Some("user") {
        return;
    }
    let Some(Content::Text(text)) = msg.content.as_ref() else {
        return;
    };
    if seen.contains(text) {
        return;
    }
    seen.insert(text.clone());
    messages.push(LogicalMessage {
        role: Role::User,
        text: text.clone(),
        timestamp: record.timestamp.clone(),
        order: *order,
    });
    *order += 1;
}

fn collect_assistant(
    record: &LogRecord,
    by_id: &mut HashMap<String, LogicalMessage>,
    order: &mut usize,
) {
    let Some(msg) = record.message.as_ref() else {
        return;
    };
    if msg.role.as_deref() != Some("assistant") {
        return;
    }
    let Some(Content::Blocks(blocks)) = msg.content.as_ref() else {
        return;
    };

    let text = blocks
        .iter()
        .filter(|b| b.kind == "text")
        .filter_map(|b| b.text.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    if text.is_empty() {
        return;
    }

    let id = msg.id.as_deref().filter(|i| !i.is_empty());
    if let Some(id) = id {
        if let Some(existing) = by_id.get_mut(id) {
            // Later streaming revision of the same message: longest wins,
            // equal length refreshes. Order stays where it was assigned.
            if text.len() >= existing.text.len() {
                existing.text = text;
                existing.timestamp = record.timestamp.clone();
            }
            return;
        }
    }

    let key = id
        .map(str::to_string)
        .unwrap_or_else(|| format!("_no_id_{order}"));
    by_id.insert(
        key,
        LogicalMessage {
            role: Role::Assistant,
            text,
            timestamp: record.timestamp.clone(),
            order: *order,
        },
    );
    *order += 1;
}
