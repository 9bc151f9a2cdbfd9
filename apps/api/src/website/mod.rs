//! Website summarization — fetch a page, extract its text, and ask the model
//! for the key information. Unlike the resume agents the reply is returned as-is.

pub mod extractor;
pub mod handlers;
pub mod prompts;

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use url::Url;

use crate::llm_client::prompts::invoke;
use crate::llm_client::{ChatModel, LlmError};
use crate::website::extractor::{ExtractionError, PageExtractor};
use crate::website::prompts::WEBSITE_PROMPT;

/// Failure of one of the two phases, kept apart so callers can tell them apart.
#[derive(Debug, Error)]
pub enum WebsiteError {
    #[error("website extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("website summarization failed: {0}")]
    Summarization(#[from] LlmError),
}

#[derive(Debug, Clone, Serialize)]
pub struct WebsiteSummary {
    pub website_url: String,
    pub website_details: String,
    pub summary: String,
}

/// Extracts `url` and summarizes it with a single model call.
pub async fn summarize_website(
    llm: &dyn ChatModel,
    extractor: &dyn PageExtractor,
    url: &Url,
) -> Result<WebsiteSummary, WebsiteError> {
    info!("Extracting website content from {url}");
    let details = extractor.extract(url).await.map_err(|e| {
        error!(phase = "extraction", "website extraction failed for {url}: {e}");
        e
    })?;

    let summary = invoke(llm, &WEBSITE_PROMPT, &[("text", details.as_str())])
        .await
        .map_err(|e| {
            error!(phase = "summarization", "website summary failed for {url}: {e}");
            e
        })?;

    Ok(WebsiteSummary {
        website_url: url.to_string(),
        website_details: details,
        summary,
    })
}
