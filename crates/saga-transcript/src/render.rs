use std::sync::LazyLock;

use regex::Regex;

use crate::reconstruct::{LogicalMessage, Role};

/// `<summary>` tags in any casing/spacing break Obsidian callouts.
static SUMMARY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*/?\s*summary\s*>").unwrap());

struct RenderedBlock {
    role: Role,
    text: String,
}

/// Merge adjacent messages of the same role so no two consecutive rendered
/// blocks share a role.
fn merge_adjacent(messages: &[LogicalMessage]) -> Vec<RenderedBlock> {
    let mut blocks: Vec<RenderedBlock> = Vec::new();
    for msg in messages {
        match blocks.last_mut() {
            Some(last) if last.role == msg.role => {
                last.text.push_str("\n\n");
                last.text.push_str(&msg.text);
            }
            _ => blocks.push(RenderedBlock {
                role: msg.role,
                text: msg.text.clone(),
            }),
        }
    }
    blocks
}

/// `2026-02-14T03:42:00Z` → `2026-02-14 03:42`. Unparseable timestamps are
/// shown verbatim.
fn format_date(ts: &str) -> String {
    match time::OffsetDateTime::parse(ts, &time::format_description::well_known::Rfc3339) {
        Ok(dt) => format!(
            "{:04}-{:02}-{:02} {:02}:{:02}",
            dt.year(),
            u8::from(dt.month()),
            dt.day(),
            dt.hour(),
            dt.minute()
        ),
        Err(_) => ts.to_string(),
    }
}

/// Render the reconstructed conversation as a Markdown document: a header
/// block, then one block-quoted callout section per rendered block.
pub fn render_markdown(messages: &[LogicalMessage], session_id: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Claude Code Session".to_string());
    lines.push(String::new());

    if let Some(ts) = messages
        .first()
        .and_then(|m| m.timestamp.as_deref())
        .filter(|t| !t.is_empty())
    {
        lines.push(format!("**Date:** {}", format_date(ts)));
    }
    lines.push(format!("**Session ID:** `{session_id}`"));
    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());

    for block in merge_adjacent(messages) {
        let text = SUMMARY_TAG.replace_all(&block.text, "");
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        lines.push(match block.role {
            Role::User => "> [!question] User".to_string(),
            Role::Assistant => "> [!example] Claude".to_string(),
        });
        for text_line in text.lines() {
            lines.push(format!("> {text_line}"));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(role: Role, text: &str, order: usize) -> LogicalMessage {
        LogicalMessage {
            role,
            text: text.to_string(),
            timestamp: Some("2026-02-14T03:42:07Z".to_string()),
            order,
        }
    }

    #[test]
    fn renders_header_and_callouts() {
        let messages = [
            msg(Role::User, "hello", 0),
            msg(Role::Assistant, "hi there", 1),
        ];
        let doc = render_markdown(&messages, "sess-1");
        assert!(doc.starts_with("# Claude Code Session\n"));
        assert!(doc.contains("**Date:** 2026-02-14 03:42"));
        assert!(doc.contains("**Session ID:** `sess-1`"));
        assert!(doc.contains("> [!question] User\n> hello"));
        assert!(doc.contains("> [!example] Claude\n> hi there"));
    }

    #[test]
    fn adjacent_same_role_messages_merge() {
        let messages = [
            msg(Role::User, "first", 0),
            msg(Role::User, "second", 1),
            msg(Role::Assistant, "reply", 2),
        ];
        let doc = render_markdown(&messages, "s");
        assert_eq!(doc.matches("> [!question] User").count(), 1);
        assert!(doc.contains("> first\n> \n> second"));
    }

    #[test]
    fn no_two_consecutive_blocks_share_a_role() {
        let messages = [
            msg(Role::Assistant, "a", 0),
            msg(Role::Assistant, "b", 1),
            msg(Role::User, "c", 2),
            msg(Role::User, "d", 3),
            msg(Role::Assistant, "e", 4),
        ];
        let blocks = merge_adjacent(&messages);
        assert_eq!(blocks.len(), 3);
        for pair in blocks.windows(2) {
            assert_ne!(pair[0].role, pair[1].role);
        }
    }

    #[test]
    fn summary_tags_stripped_in_any_casing_and_spacing() {
        let messages = [msg(Role::Assistant, "<Summary>core</ summary > text", 0)];
        let doc = render_markdown(&messages, "s");
        assert!(doc.contains("> core text"));
        assert!(!doc.to_lowercase().contains("summary>"));
    }

    #[test]
    fn block_reduced_to_nothing_is_skipped() {
        let messages = [
            msg(Role::User, "<summary></summary>", 0),
            msg(Role::Assistant, "kept", 1),
        ];
        let doc = render_markdown(&messages, "s");
        assert!(!doc.contains("[!question]"));
        assert!(doc.contains("> [!example] Claude\n> kept"));
    }

    #[test]
    fn unparseable_timestamp_shown_verbatim() {
        let messages = [LogicalMessage {
            role: Role::User,
            text: "hi".to_string(),
            timestamp: Some("yesterday-ish".to_string()),
            order: 0,
        }];
        let doc = render_markdown(&messages, "s");
        assert!(doc.contains("**Date:** yesterday-ish"));
    }

    #[test]
    fn missing_timestamp_omits_date_line() {
        let messages = [LogicalMessage {
            role: Role::User,
            text: "hi".to_string(),
            timestamp: None,
            order: 0,
        }];
        let doc = render_markdown(&messages, "s");
        assert!(!doc.contains("**Date:**"));
        assert!(doc.contains("**Session ID:**"));
    }

    #[test]
    fn multiline_text_quotes_every_line() {
        let messages = [msg(Role::Assistant, "line one\nline two", 0)];
        let doc = render_markdown(&messages, "s");
        assert!(doc.contains("> line one\n> line two"));
    }
}
