// Resume vs job description analysis.
// Three LLM agents: similarity, gap analysis, and a compilation step that reconciles both.
// All LLM calls go through llm_client — no direct backend calls here.

pub mod agents;
pub mod coercion;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
