use serde::{Deserialize, Serialize};

/// One agent's structured verdict, normalised from free-text model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentOutput {
    pub name: String,
    pub summary: String,
    pub highlights: Vec<String>,
}

/// The two free-form texts every analysis starts from.
#[derive(Debug, Clone)]
pub struct PipelineInput {
    pub resume_text: String,
    pub job_description: String,
}

/// Outputs of the three stages, in stage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    pub similarity: AgentOutput,
    pub gaps: AgentOutput,
    pub verdict: AgentOutput,
}

impl PipelineResult {
    /// `[similarity, gaps, verdict]`.
    pub fn into_ordered(self) -> [AgentOutput; 3] {
        [self.similarity, self.gaps, self.verdict]
    }
}
