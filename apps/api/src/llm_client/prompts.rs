// Shared prompt plumbing: templates, placeholder rendering, and input truncation.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::llm_client::{ChatModel, LlmError};

/// Upper bound, in characters, for any single value inserted into a prompt.
pub const MAX_FIELD_CHARS: usize = 4000;

/// Appended to a value that was cut at `MAX_FIELD_CHARS`.
pub const TRUNCATION_MARKER: &str = "\n...\n[truncated]";

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

/// A system instruction plus a user message with `{name}` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub system: &'static str,
    pub user: &'static str,
}

impl PromptTemplate {
    /// Fills the user message. Values are truncated first and are never re-scanned,
    /// so a value containing `{something}` is inserted literally.
    /// Placeholders with no matching variable are left as they are.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        PLACEHOLDER
            .replace_all(self.user, |caps: &Captures| {
                let name = &caps[1];
                match vars.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => truncate(value),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

/// Cuts `text` to `MAX_FIELD_CHARS` characters and appends `TRUNCATION_MARKER`.
/// Text at or under the limit is returned unchanged.
pub fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_FIELD_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Renders `template` with `vars` and sends it to the model, returning the raw reply.
pub async fn invoke(
    llm: &dyn ChatModel,
    template: &PromptTemplate,
    vars: &[(&str, &str)],
) -> Result<String, LlmError> {
    let user = template.render(vars);
    llm.complete(template.system, &user).await
}
