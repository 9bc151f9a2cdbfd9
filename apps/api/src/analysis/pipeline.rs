//! Analysis pipeline — similarity and gap agents feed the compilation agent.
//!
//! Flow: analyze_similarity ─┐
//!                           ├─→ compile_verdict → PipelineResult
//!       analyze_gaps ───────┘
//!
//! The first two stages share nothing; in `Parallel` mode they run under
//! `try_join!`. Either way the compilation agent only starts once both are done,
//! and the first failure ends the run with no partial result.

use tracing::info;

use crate::analysis::agents::{analyze_gaps, analyze_similarity, compile_verdict, AgentError};
use crate::analysis::models::{PipelineInput, PipelineResult};
use crate::llm_client::ChatModel;

/// How the two independent stages are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StageMode {
    /// Similarity, then gaps.
    #[default]
    Sequential,
    /// Similarity and gaps concurrently.
    Parallel,
}

impl StageMode {
    pub fn from_flag(parallel: bool) -> Self {
        if parallel {
            StageMode::Parallel
        } else {
            StageMode::Sequential
        }
    }
}

/// Runs the three agents for one resume / job description pair.
pub async fn run_agent_workflow(
    llm: &dyn ChatModel,
    input: &PipelineInput,
    mode: StageMode,
) -> Result<PipelineResult, AgentError> {
    info!(
        "Starting analysis ({:?}): resume={} chars, job_description={} chars",
        mode,
        input.resume_text.chars().count(),
        input.job_description.chars().count()
    );

    let (similarity, gaps) = match mode {
        StageMode::Sequential => {
            let similarity = analyze_similarity(llm, input).await?;
            let gaps = analyze_gaps(llm, input).await?;
            (similarity, gaps)
        }
        StageMode::Parallel => {
            tokio::try_join!(analyze_similarity(llm, input), analyze_gaps(llm, input))?
        }
    };

    let verdict = compile_verdict(llm, Some(&similarity), Some(&gaps)).await?;

    Ok(PipelineResult {
        similarity,
        gaps,
        verdict,
    })
}
