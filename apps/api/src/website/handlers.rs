//! Axum route handler for website summaries.

use axum::{extract::State, Form, Json};
use serde::Deserialize;
use url::Url;

use crate::errors::AppError;
use crate::state::AppState;
use crate::website::{summarize_website, WebsiteSummary};

#[derive(Debug, Deserialize)]
pub struct WebsiteSummaryRequest {
    pub website_url: String,
}

/// POST /website-summary
///
/// Form field `website_url` must be an absolute http(s) URL.
pub async fn handle_website_summary(
    State(state): State<AppState>,
    Form(request): Form<WebsiteSummaryRequest>,
) -> Result<Json<WebsiteSummary>, AppError> {
    let url = parse_website_url(&request.website_url)?;
    let summary =
        summarize_website(state.llm.as_ref(), state.page_extractor.as_ref(), &url).await?;
    Ok(Json(summary))
}

fn parse_website_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::Validation(format!("website_url is not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(AppError::Validation(
            "website_url must be an http or https URL".to_string(),
        )),
    }
}
