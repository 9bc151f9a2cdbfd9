//! Axum route handler for the Analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::analysis::models::{AgentOutput, PipelineInput};
use crate::analysis::pipeline::run_agent_workflow;
use crate::errors::AppError;
use crate::state::AppState;

pub const ALLOWED_RESUME_TYPES: &[&str] = &["application/pdf"];
pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;
/// Characters of parsed resume text echoed back for debugging.
const RESUME_EXCERPT_CHARS: usize = 500;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub resume_character_count: usize,
    pub job_description_character_count: usize,
    pub agent_results: Vec<AgentOutput>,
    pub combined_summary: String,
    pub resume_excerpt: String,
}

/// The uploaded `resume` file part.
struct ResumeUpload {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handler
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze
///
/// Multipart form: `job_description` (text) and `resume` (PDF file).
/// Validation and PDF parsing happen before any LLM call.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let (job_description, resume) = read_form(multipart).await?;

    validate_resume(&resume)?;
    info!(
        "Received resume {:?} ({} bytes, {:?})",
        resume.file_name,
        resume.data.len(),
        resume.content_type
    );

    let parser = state.resume_parser.clone();
    let resume_text = tokio::task::spawn_blocking(move || {
        parser.convert_pdf_bytes(&resume.data, resume.file_name.as_deref())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("resume parser task failed: {e}")))??;

    let input = PipelineInput {
        resume_text,
        job_description,
    };
    let result = run_agent_workflow(state.llm.as_ref(), &input, state.stage_mode).await?;

    let [similarity, gaps, verdict] = result.into_ordered();
    let combined_summary = verdict.summary.clone();

    Ok(Json(AnalysisResponse {
        resume_character_count: input.resume_text.chars().count(),
        job_description_character_count: input.job_description.chars().count(),
        agent_results: vec![similarity, gaps, verdict],
        combined_summary,
        resume_excerpt: input.resume_text.chars().take(RESUME_EXCERPT_CHARS).collect(),
    }))
}

/// Pulls the two expected fields out of the form; unknown fields are ignored.
async fn read_form(mut multipart: Multipart) -> Result<(String, ResumeUpload), AppError> {
    let mut job_description: Option<String> = None;
    let mut resume: Option<ResumeUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("job_description") => {
                job_description = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("resume") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;
                resume = Some(ResumeUpload {
                    file_name,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    let job_description = job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::UnprocessableEntity("job_description is required".to_string()))?;
    let resume =
        resume.ok_or_else(|| AppError::UnprocessableEntity("resume file is required".to_string()))?;

    Ok((job_description, resume))
}

fn validate_resume(resume: &ResumeUpload) -> Result<(), AppError> {
    let content_type = resume.content_type.as_deref().unwrap_or("none");
    if !ALLOWED_RESUME_TYPES.contains(&content_type) {
        return Err(AppError::Validation(format!(
            "Unsupported resume content type {content_type}. Only PDF files are accepted."
        )));
    }
    if resume.data.len() > MAX_RESUME_BYTES {
        return Err(AppError::PayloadTooLarge(format!(
            "Resume exceeds the {} MB upload limit.",
            MAX_RESUME_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}
