// src/extract.rs
// Tiered best-effort extraction of a result candidate from an agent reply.
//
// The agent is not contractually guaranteed to emit clean JSON, so the
// extractor walks an ordered list of attempt functions and takes the first
// hit. Tier order is load-bearing: tiers 1-2 accept a narrower field set
// than tier 3, and changing either would change which tier wins on
// ambiguous input.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::types::AgentMessage;

/// Message types that are internal agent plumbing, never the answer.
const INTERNAL_TYPES: &[&str] = &["function_call", "tool_response", "verbose"];

/// Advice used when the reply carries no usable content at all.
const FALLBACK_ADVICE: &str = "Generation finished, but no image data was found";

static IMAGE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https?://[^\s"']+\.(jpg|jpeg|png|gif|webp)"#)
        .expect("image url pattern must compile")
});

/// Recover a candidate object from a parsed reply body. Pure and
/// idempotent; the candidate still has to pass `validate_result`.
///
/// A body without a `messages` array is treated as the candidate itself.
pub fn extract_candidate(body: &Value) -> Value {
    let Some(messages) = parse_messages(body) else {
        debug!("reply has no messages array, using body as candidate");
        return body.clone();
    };

    type Attempt = fn(&[AgentMessage]) -> Option<Value>;
    const TIERS: &[(&str, Attempt)] = &[
        ("direct answer parse", direct_answer),
        ("generic content parse", generic_content),
        ("scan-all structured parse", scan_structured),
        ("text url scrape", scrape_image_url),
    ];

    for (name, attempt) in TIERS {
        if let Some(candidate) = attempt(&messages) {
            debug!(tier = name, "extracted candidate");
            return candidate;
        }
    }

    warn!(
        count = messages.len(),
        "no tier matched, falling back to last message content"
    );
    default_fallback(&messages)
}

fn parse_messages(body: &Value) -> Option<Vec<AgentMessage>> {
    let raw = body.get("messages")?.as_array()?;
    if raw.is_empty() {
        return None;
    }
    Some(
        raw.iter()
            .map(|m| serde_json::from_value(m.clone()).unwrap_or(AgentMessage {
                msg_type: String::new(),
                role: String::new(),
                content: None,
            }))
            .collect(),
    )
}

/// Parse message content as JSON and accept it only when it is an object
/// carrying at least one of the given fields.
fn parse_with_fields(content: &str, fields: &[&str]) -> Option<Value> {
    let parsed: Value = serde_json::from_str(content).ok()?;
    let obj = parsed.as_object()?;
    if fields.iter().any(|f| obj.contains_key(*f)) {
        Some(parsed)
    } else {
        None
    }
}

/// Tier 1: the first `answer`-typed message with content.
fn direct_answer(messages: &[AgentMessage]) -> Option<Value> {
    let msg = messages
        .iter()
        .find(|m| m.msg_type == "answer" && m.content.is_some())?;
    parse_with_fields(msg.content.as_deref()?, &["image_url", "diagnosis", "advice"])
}

/// Tier 2: only when no answer-typed message exists at all, the first
/// content-bearing message of a non-internal type. An answer message whose
/// content failed to parse skips this tier and falls through to tier 3.
fn generic_content(messages: &[AgentMessage]) -> Option<Value> {
    let has_answer = messages
        .iter()
        .any(|m| m.msg_type == "answer" && m.content.is_some());
    if has_answer {
        return None;
    }

    let msg = messages
        .iter()
        .find(|m| m.content.is_some() && !INTERNAL_TYPES.contains(&m.msg_type.as_str()))?;
    parse_with_fields(msg.content.as_deref()?, &["image_url", "diagnosis", "advice"])
}

/// Tier 3: every message in order, accepting the first parsed object with
/// any expected field. Deliberately wider than tiers 1-2: `keywords`
/// alone qualifies here.
fn scan_structured(messages: &[AgentMessage]) -> Option<Value> {
    messages.iter().find_map(|msg| {
        parse_with_fields(
            msg.content.as_deref()?,
            &["image_url", "diagnosis", "advice", "keywords"],
        )
    })
}

/// Tier 4: scrape the first image URL out of plain text. When the same
/// content also parses as an object, its own fields win over the scraped
/// URL and raw text.
fn scrape_image_url(messages: &[AgentMessage]) -> Option<Value> {
    messages.iter().find_map(|msg| {
        let content = msg.content.as_deref()?;
        let url = IMAGE_URL_RE.find(content)?.as_str();
        debug!(url, msg_type = %msg.msg_type, "scraped image url from text");

        let candidate = match serde_json::from_str::<Value>(content) {
            Ok(parsed) if parsed.is_object() => json!({
                "image_url": parsed.get("image_url").and_then(Value::as_str).unwrap_or(url),
                "diagnosis": parsed.get("diagnosis").cloned().unwrap_or(Value::Null),
                "advice": parsed.get("advice").and_then(Value::as_str).unwrap_or(content),
                "keywords": parsed.get("keywords").cloned().unwrap_or_else(|| json!([])),
            }),
            _ => json!({
                "image_url": url,
                "diagnosis": null,
                "advice": content,
                "keywords": [],
            }),
        };
        Some(candidate)
    })
}

/// Tier 5: last message's content as advice, or a fixed placeholder.
fn default_fallback(messages: &[AgentMessage]) -> Value {
    let content = messages
        .last()
        .and_then(|m| m.content.as_deref())
        .unwrap_or(FALLBACK_ADVICE);

    json!({
        "advice": content,
        "image_url": null,
        "diagnosis": null,
        "keywords": [],
    })
}
