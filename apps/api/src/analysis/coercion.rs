//! Response coercion — turns whatever the model said into an `AgentOutput`.
//!
//! The agents are asked for `{"summary": ..., "highlights": [...]}` but models
//! wrap it in prose, fence it, or ignore the instruction entirely. Coercion never
//! fails: anything that cannot be read as that object degrades to the raw text
//! as the summary with no highlights.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::warn;

use crate::analysis::models::AgentOutput;

/// Summary used when the model returned nothing usable.
pub const NO_SUMMARY: &str = "No summary returned by the LLM.";

/// Highlights beyond this count are dropped.
pub const MAX_HIGHLIGHTS: usize = 8;

/// Greedy: first `{` through last `}`, across newlines.
static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON object pattern is valid"));

/// Locates the widest `{...}` span in `raw`, if any.
pub fn extract_json_blob(raw: &str) -> Option<&str> {
    JSON_OBJECT.find(raw).map(|m| m.as_str())
}

/// Normalises raw model text into an `AgentOutput` named `agent_name`.
pub fn coerce_agent_output(raw: &str, agent_name: &str) -> AgentOutput {
    let payload = extract_json_blob(raw)
        .and_then(|blob| serde_json::from_str::<Map<String, Value>>(blob).ok());

    let (summary, highlights) = match payload {
        Some(fields) => (
            fields.get("summary").map(value_to_text).unwrap_or_default(),
            fields
                .get("highlights")
                .map(normalize_highlights)
                .unwrap_or_default(),
        ),
        None => {
            warn!("{agent_name}: no JSON object in model output, using raw text as summary");
            (raw.trim().to_string(), Vec::new())
        }
    };

    let summary = summary.trim();
    AgentOutput {
        name: agent_name.to_string(),
        summary: if summary.is_empty() {
            NO_SUMMARY.to_string()
        } else {
            summary.to_string()
        },
        highlights,
    }
}

/// Lists are taken element-wise; any other non-empty value becomes a single highlight.
fn normalize_highlights(value: &Value) -> Vec<String> {
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other if is_blank(other) => Vec::new(),
        other => vec![other],
    };

    items
        .into_iter()
        .map(|item| value_to_text(item).trim().to_string())
        .filter(|item| !item.is_empty())
        .take(MAX_HIGHLIGHTS)
        .collect()
}

/// Strings verbatim, blanks as "", everything else as compact JSON.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other if is_blank(other) => String::new(),
        other => other.to_string(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
