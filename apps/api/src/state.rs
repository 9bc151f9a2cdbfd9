use std::sync::Arc;

use crate::analysis::pipeline::StageMode;
use crate::llm_client::ChatModel;
use crate::resume::ResumeParser;
use crate::website::extractor::PageExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Chat backend for every agent. Default: `LlmClient`.
    pub llm: Arc<dyn ChatModel>,
    /// PDF-to-text backend. Default: `PdfResumeParser`.
    pub resume_parser: Arc<dyn ResumeParser>,
    /// URL-to-text backend. Default: `HttpPageExtractor`.
    pub page_extractor: Arc<dyn PageExtractor>,
    pub stage_mode: StageMode,
}
