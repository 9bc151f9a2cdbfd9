//! The three analysis agents. Each renders its prompt, makes exactly one model
//! call, and coerces the reply. A failed call is wrapped with the stage that made it.

use std::fmt;

use thiserror::Error;
use tracing::{error, info};

use crate::analysis::coercion::coerce_agent_output;
use crate::analysis::models::{AgentOutput, PipelineInput};
use crate::analysis::prompts::{COMPILATION_PROMPT, GAP_PROMPT, SIMILARITY_PROMPT};
use crate::llm_client::prompts::{invoke, PromptTemplate};
use crate::llm_client::{ChatModel, LlmError};

/// Which pipeline stage an output or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentStage {
    Similarity,
    GapAnalysis,
    Compilation,
}

impl AgentStage {
    /// Diagnostic label used in logs and error messages.
    pub fn label(self) -> &'static str {
        match self {
            AgentStage::Similarity => "Agent 1 (similarity & strengths)",
            AgentStage::GapAnalysis => "Agent 2 (gap analysis)",
            AgentStage::Compilation => "Agent 3 (compilation)",
        }
    }

    /// Name stamped on the stage's `AgentOutput`.
    pub fn output_name(self) -> &'static str {
        match self {
            AgentStage::Similarity => "Similarity & strengths agent",
            AgentStage::GapAnalysis => "Gap analysis agent",
            AgentStage::Compilation => "Compilation agent",
        }
    }

    fn prompt(self) -> &'static PromptTemplate {
        match self {
            AgentStage::Similarity => &SIMILARITY_PROMPT,
            AgentStage::GapAnalysis => &GAP_PROMPT,
            AgentStage::Compilation => &COMPILATION_PROMPT,
        }
    }
}

impl fmt::Display for AgentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An agent could not get a reply from the model.
#[derive(Debug, Error)]
#[error("{stage} could not complete due to an upstream error")]
pub struct AgentError {
    pub stage: AgentStage,
    #[source]
    pub source: LlmError,
}

/// Placeholder sent to the compilation agent when an upstream stage has no output.
pub fn missing_feedback(stage: AgentStage) -> String {
    match stage {
        AgentStage::Similarity => "Agent 1 did not produce feedback.".to_string(),
        AgentStage::GapAnalysis => "Agent 2 did not produce feedback.".to_string(),
        AgentStage::Compilation => "Agent 3 did not produce feedback.".to_string(),
    }
}

/// Summary followed by each highlight, one per line.
pub fn feedback_block(output: Option<&AgentOutput>, stage: AgentStage) -> String {
    match output {
        Some(output) => std::iter::once(output.summary.as_str())
            .chain(output.highlights.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n"),
        None => missing_feedback(stage),
    }
}

async fn run_stage(
    llm: &dyn ChatModel,
    stage: AgentStage,
    vars: &[(&str, &str)],
) -> Result<AgentOutput, AgentError> {
    info!("{stage}: calling model");
    let raw = invoke(llm, stage.prompt(), vars).await.map_err(|source| {
        error!(stage = stage.label(), "agent call failed: {source}");
        AgentError { stage, source }
    })?;

    let output = coerce_agent_output(&raw, stage.output_name());
    info!("{stage}: done ({} highlights)", output.highlights.len());
    Ok(output)
}

/// Stage 1: overlaps and strengths between resume and job description.
pub async fn analyze_similarity(
    llm: &dyn ChatModel,
    input: &PipelineInput,
) -> Result<AgentOutput, AgentError> {
    run_stage(
        llm,
        AgentStage::Similarity,
        &[
            ("resume_excerpt", input.resume_text.as_str()),
            ("job_description", input.job_description.as_str()),
        ],
    )
    .await
}

/// Stage 2: missing skills and signals. Independent of stage 1.
pub async fn analyze_gaps(
    llm: &dyn ChatModel,
    input: &PipelineInput,
) -> Result<AgentOutput, AgentError> {
    run_stage(
        llm,
        AgentStage::GapAnalysis,
        &[
            ("resume_excerpt", input.resume_text.as_str()),
            ("job_description", input.job_description.as_str()),
        ],
    )
    .await
}

/// Stage 3: reconciles the strengths and gaps into a verdict.
pub async fn compile_verdict(
    llm: &dyn ChatModel,
    similarity: Option<&AgentOutput>,
    gaps: Option<&AgentOutput>,
) -> Result<AgentOutput, AgentError> {
    let agent_one = feedback_block(similarity, AgentStage::Similarity);
    let agent_two = feedback_block(gaps, AgentStage::GapAnalysis);
    run_stage(
        llm,
        AgentStage::Compilation,
        &[
            ("agent_one_feedback", agent_one.as_str()),
            ("agent_two_feedback", agent_two.as_str()),
        ],
    )
    .await
}
