//! Markdown front-matter splitting: a top-of-file `---` YAML fence followed
//! by the document body. The docs corpus uses YAML fences exclusively.

use crate::{Error, Result};
use serde_json::{Map, Value};

/// Split a document into (front matter as a JSON object, body).
///
/// No fence, or an unterminated fence, yields an empty metadata object with
/// the whole text as body. A present but malformed fence is an error: the
/// document author intended metadata and we must not serve it as body text.
pub fn split_front_matter(text: &str) -> Result<(Value, String)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let rest = match text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    {
        Some(rest) => rest,
        None => return Ok((Value::Object(Map::new()), text.to_owned())),
    };

    let Some((fenced, body)) = take_until_fence(rest, "---") else {
        // Unterminated fence: treat as body-only.
        return Ok((Value::Object(Map::new()), text.to_owned()));
    };

    let yaml: serde_yml::Value =
        serde_yml::from_str(fenced).map_err(|e| Error::FrontMatter(e.to_string()))?;
    let metadata =
        serde_json::to_value(yaml).map_err(|e| Error::FrontMatter(e.to_string()))?;
    let metadata = match metadata {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    Ok((metadata, body.to_owned()))
}

/// Find the closing fence line; returns (fenced text, remainder after the
/// fence line).
fn take_until_fence<'a>(rest: &'a str, fence: &str) -> Option<(&'a str, &'a str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed == fence {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}
