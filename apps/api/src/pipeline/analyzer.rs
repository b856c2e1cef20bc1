//! Profile Analyzer — first LLM pass: extracted CV text → narrative profile.

use crate::llm_client::{Completion, CompletionRequest};
use crate::pipeline::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};
use crate::pipeline::PipelineError;

/// Low temperature biases toward deterministic, complete output over creativity.
const ANALYSIS_TEMPERATURE: f32 = 0.3;
const ANALYSIS_MAX_TOKENS: u32 = 2000;

/// Free-form but section-structured text produced by the analysis call.
/// Owned transiently by one pipeline run; consumed by skill extraction.
#[derive(Debug, Clone)]
pub struct NarrativeProfile(String);

impl NarrativeProfile {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Builds the analysis prompt. Pure — prompt changes are testable without
/// touching the network.
pub fn build_analysis_prompt(cv_text: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE.replace("{cv_text}", cv_text)
}

/// Runs the narrative analysis call. Empty input text is accepted and yields
/// a low-confidence profile; it is not a precondition failure.
pub async fn analyze(
    llm: &dyn Completion,
    cv_text: &str,
) -> Result<NarrativeProfile, PipelineError> {
    let request = CompletionRequest {
        system: ANALYSIS_SYSTEM,
        prompt: build_analysis_prompt(cv_text),
        temperature: ANALYSIS_TEMPERATURE,
        max_tokens: ANALYSIS_MAX_TOKENS,
    };

    let text = llm
        .complete(request)
        .await
        .map_err(|e| PipelineError::Analysis {
            cause: e.to_string(),
        })?;

    Ok(NarrativeProfile(text))
}
