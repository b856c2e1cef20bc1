//! CV Analysis & Project Matching Pipeline.
//!
//! Flow: bytes → extract → narrative analysis (LLM call 1) → skill vector
//! extraction (LLM call 2) → project matching (LLM call 3) → ranked matches.
//!
//! Every entity is created and dropped within one run; no stage shares
//! mutable state across invocations. Each stage fails fast with a typed
//! error — no stage substitutes fabricated data for a failure.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

pub mod analyzer;
pub mod extract;
pub mod handlers;
pub mod matcher;
pub mod prompts;
pub mod skills;
pub mod validator;

use crate::catalog::ProjectCatalog;
use crate::llm_client::Completion;
use extract::RawDocument;
use matcher::{MatchResult, MatchSummary};
use skills::SkillRecord;

/// Pipeline failure taxonomy. Each variant is surfaced to the boundary layer,
/// which maps it to a human-readable message and halts that stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("unsupported file type: {media_type}")]
    UnsupportedFormat { media_type: String },

    #[error("failed to read {format} document: {cause}")]
    ExtractionFailure { format: &'static str, cause: String },

    #[error("CV analysis failed: {cause}")]
    Analysis { cause: String },

    #[error("model returned malformed structured data: {snippet}")]
    MalformedResponse { snippet: String },

    #[error("project matching failed: {cause}")]
    Matching { cause: String },
}

/// The pipeline's boundary value: plain, serializable, no UI-specific fields.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub skill_record: SkillRecord,
    pub matches: Vec<MatchResult>,
    pub summary: MatchSummary,
}

/// Runs the full pipeline for one uploaded document.
///
/// The catalog is fetched once and reused for the matching stage. A catalog
/// fetch failure surfaces as a matching failure — the store is a collaborator
/// of that stage only.
pub async fn run_pipeline(
    llm: &dyn Completion,
    catalog: &dyn ProjectCatalog,
    document: &RawDocument,
    top_n: usize,
) -> Result<PipelineOutput, PipelineError> {
    info!(
        "Extracting text from '{}' ({})",
        document.filename, document.declared_media_type
    );
    let cv_text = extract::extract(document)?;
    if cv_text.trim().is_empty() {
        warn!("extracted text is empty — analysis will be low-confidence");
    }

    let profile = analyzer::analyze(llm, &cv_text).await?;
    info!("Narrative profile: {} chars", profile.as_str().len());

    let skill_record = skills::extract_skills(llm, &profile).await?;
    info!(
        "Skill record: {} technical / {} business skills, seniority {:?}, readiness {}/10",
        skill_record.technical_skills.len(),
        skill_record.business_skills.len(),
        skill_record.seniority_level,
        skill_record.consulting_readiness_score
    );

    let projects = catalog
        .fetch()
        .await
        .map_err(|e| PipelineError::Matching {
            cause: format!("catalog fetch failed: {e}"),
        })?;
    info!("Fetched {} projects from catalog", projects.len());

    let outcome = matcher::match_projects(llm, &skill_record, &projects, top_n).await?;
    info!("Ranked {} matches", outcome.matches.len());

    Ok(PipelineOutput {
        skill_record,
        matches: outcome.matches,
        summary: outcome.summary,
    })
}
