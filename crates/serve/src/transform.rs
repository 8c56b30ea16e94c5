//! Content transformers: JSON and JSONC parsing without panics.
//!
//! JSONC is JSON plus `//` / `/* */` comments and trailing commas, used for
//! the human-maintained redirect files. Stripping happens before parsing so
//! serde_json's diagnostics still apply to the cleaned text; successful
//! values re-serialize to canonical compact JSON.

use crate::{Error, Result};
use serde_json::Value;

/// Parse strict JSON; syntax errors surface serde_json's diagnostic
/// (including line/column position) in the message.
pub fn parse_json(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| Error::JsonParse(e.to_string()))
}

/// Parse JSONC: comments and trailing commas are stripped, then the rest must
/// be valid JSON. Pure and deterministic; idempotent on serialized output.
pub fn parse_jsonc(text: &str) -> Result<Value> {
    parse_json(&strip_jsonc(text))
}

#[derive(Clone, Copy, PartialEq)]
enum ScanState {
    Json,
    InString,
    Escape,
    LineComment,
    BlockComment,
}

/// Remove comments (string-literal aware) and trailing commas before a
/// closing `]` or `}`.
fn strip_jsonc(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = ScanState::Json;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match state {
            ScanState::Json => match ch {
                '"' => {
                    state = ScanState::InString;
                    out.push(ch);
                }
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = ScanState::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = ScanState::BlockComment;
                }
                _ => out.push(ch),
            },
            ScanState::InString => {
                out.push(ch);
                match ch {
                    '\\' => state = ScanState::Escape,
                    '"' => state = ScanState::Json,
                    _ => {}
                }
            }
            ScanState::Escape => {
                out.push(ch);
                state = ScanState::InString;
            }
            ScanState::LineComment => {
                if ch == '\n' {
                    out.push(ch);
                    state = ScanState::Json;
                }
            }
            ScanState::BlockComment => {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = ScanState::Json;
                }
            }
        }
    }

    drop_trailing_commas(&out)
}

/// Second pass over comment-free text: a comma whose next non-whitespace
/// character closes an array or object is dropped.
fn drop_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = ScanState::Json;
    let chars: Vec<char> = text.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        match state {
            ScanState::Json => {
                if ch == '"' {
                    state = ScanState::InString;
                } else if ch == ',' {
                    let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                    if matches!(next, Some(']') | Some('}')) {
                        continue;
                    }
                }
                out.push(ch);
            }
            ScanState::InString => {
                out.push(ch);
                match ch {
                    '\\' => state = ScanState::Escape,
                    '"' => state = ScanState::Json,
                    _ => {}
                }
            }
            ScanState::Escape => {
                out.push(ch);
                state = ScanState::InString;
            }
            ScanState::LineComment | ScanState::BlockComment => unreachable!(),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strict_json_parses() {
        let value = parse_json(r#"{"from":"/docs/cli","to":"/docs/new"}"#).unwrap();
        assert_eq!(value["from"], "/docs/cli");
    }

    #[test]
    fn strict_json_rejects_trailing_commas_with_a_position() {
        let err = parse_json("[1, 2,]").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Failed to parse JSON:"), "{message}");
        assert!(message.contains("line"), "{message}");
    }

    #[test]
    fn jsonc_tolerates_trailing_commas() {
        let value = parse_jsonc(
            r#"[{"from":"/docs/cli","to":"/docs/terraform-docs-common/cli",}]"#,
        )
        .unwrap();
        assert_eq!(
            value,
            json!([{"from": "/docs/cli", "to": "/docs/terraform-docs-common/cli"}])
        );
    }

    #[test]
    fn jsonc_strips_line_and_block_comments() {
        let value = parse_jsonc(
            "// top note\n[\n  {\"from\": \"/a\", /* inline */ \"to\": \"/b\"},\n]",
        )
        .unwrap();
        assert_eq!(value, json!([{"from": "/a", "to": "/b"}]));
    }

    #[test]
    fn comment_markers_inside_strings_are_preserved() {
        let value = parse_jsonc(r#"{"url": "https://example.com/x", "note": "a /* b */ c, }"}"#)
            .unwrap();
        assert_eq!(value["url"], "https://example.com/x");
        assert_eq!(value["note"], "a /* b */ c, }");
    }

    #[test]
    fn escaped_quotes_do_not_end_the_string() {
        let value = parse_jsonc(r#"{"k": "say \"hi\" // not a comment",}"#).unwrap();
        assert_eq!(value["k"], "say \"hi\" // not a comment");
    }

    #[test]
    fn jsonc_is_idempotent_on_its_own_output() {
        let input = r#"[{"from":"/docs/cli","to":"/docs/terraform-docs-common/cli",}] // tail"#;
        let first = parse_jsonc(input).unwrap();
        let reparsed = parse_jsonc(&serde_json::to_string(&first).unwrap()).unwrap();
        assert_eq!(first, reparsed);
    }

    #[test]
    fn malformed_jsonc_still_fails() {
        assert!(matches!(
            parse_jsonc("[{\"from\": }]"),
            Err(Error::JsonParse(_))
        ));
    }
}
