// LLM prompt template for website summarization.

use crate::llm_client::prompts::PromptTemplate;

/// Replace: {text}
pub const WEBSITE_PROMPT: PromptTemplate = PromptTemplate {
    system: "You are a helpful assistant that extracts key information from web page content.",
    user: "Extract key information from the following web page content:\n\n{text}",
};
