//! Resume parsing — PDF bytes in, plain text out.
//!
//! `AppState` holds an `Arc<dyn ResumeParser>`; the default backend is
//! `PdfResumeParser` (pdf-extract). Conversion is CPU-bound and synchronous,
//! so handlers run it on the blocking pool.

use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_FILE_NAME: &str = "uploaded_resume.pdf";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResumeParsingError {
    #[error("Uploaded resume is empty.")]
    Empty,

    #[error("Failed to parse the PDF resume.")]
    Unreadable,

    #[error("Unable to extract readable text from {file_name}.")]
    NoText { file_name: String },
}

/// Converts an uploaded resume into text the agents can read.
pub trait ResumeParser: Send + Sync {
    fn convert_pdf_bytes(
        &self,
        data: &[u8],
        file_name: Option<&str>,
    ) -> Result<String, ResumeParsingError>;
}

/// Default parser backed by `pdf-extract`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfResumeParser;

impl ResumeParser for PdfResumeParser {
    fn convert_pdf_bytes(
        &self,
        data: &[u8],
        file_name: Option<&str>,
    ) -> Result<String, ResumeParsingError> {
        convert_with(data, file_name, |bytes| {
            // pdf-extract panics on some malformed documents instead of returning Err.
            match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
                Ok(Ok(text)) => Ok(text),
                Ok(Err(e)) => Err(e.to_string()),
                Err(_) => Err("PDF decoder panicked".to_string()),
            }
        })
    }
}

/// Shared checks around any text extraction backend.
pub fn convert_with<F>(
    data: &[u8],
    file_name: Option<&str>,
    extract: F,
) -> Result<String, ResumeParsingError>
where
    F: FnOnce(&[u8]) -> Result<String, String>,
{
    if data.is_empty() {
        return Err(ResumeParsingError::Empty);
    }

    let printable_name = file_name.unwrap_or(DEFAULT_FILE_NAME);
    info!("Received {} bytes for {}", data.len(), printable_name);

    let text = extract(data).map_err(|reason| {
        warn!("PDF conversion failed for {printable_name}: {reason}");
        ResumeParsingError::Unreadable
    })?;

    let text = text.trim();
    if text.is_empty() {
        warn!("PDF conversion returned empty content for {printable_name}");
        return Err(ResumeParsingError::NoText {
            file_name: file_name.unwrap_or("resume").to_string(),
        });
    }

    info!(
        "Text extraction succeeded for {}: {} characters",
        printable_name,
        text.chars().count()
    );
    Ok(text.to_string())
}
