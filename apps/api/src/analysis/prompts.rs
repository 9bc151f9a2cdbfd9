// All LLM prompt templates for the analysis module.

use crate::llm_client::prompts::PromptTemplate;

/// Appends the JSON shape every analysis agent must answer in.
macro_rules! with_summary_schema {
    ($system:literal) => {
        concat!(
            $system,
            " Respond strictly in JSON with keys 'summary' (string) and 'highlights' (array of short strings)."
        )
    };
}

const RESUME_VS_JOB_USER: &str = "Resume content:\n```\n{resume_excerpt}\n```\n\
Job description:\n```\n{job_description}\n```";

/// Stage 1. Replace: {resume_excerpt}, {job_description}
pub const SIMILARITY_PROMPT: PromptTemplate = PromptTemplate {
    system: with_summary_schema!(
        "You are a resume analysing agent. Compare the resume text versus the job description \
        and call out the most impressive overlaps."
    ),
    user: RESUME_VS_JOB_USER,
};

/// Stage 2. Replace: {resume_excerpt}, {job_description}
pub const GAP_PROMPT: PromptTemplate = PromptTemplate {
    system: with_summary_schema!(
        "You are a resume analyser. Point out the missing skills, experiences or signals that \
        would make the resume a closer match for the job and what can be done better."
    ),
    user: RESUME_VS_JOB_USER,
};

/// Stage 3. Replace: {agent_one_feedback}, {agent_two_feedback}
pub const COMPILATION_PROMPT: PromptTemplate = PromptTemplate {
    system: with_summary_schema!(
        "You are a decision making agent based on resume details. The first agent provides \
        strengths and similarities with the job description. The second agent provides gaps \
        and missing elements. Highlight what is working and what should improve."
    ),
    user: "Agent 1 says:\n```\n{agent_one_feedback}\n```\n\
Agent 2 says:\n```\n{agent_two_feedback}\n```",
};
