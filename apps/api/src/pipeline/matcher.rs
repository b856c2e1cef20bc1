//! Project Matcher — scores the catalog against a SkillRecord via the LLM,
//! then defensively filters, re-ranks, and bounds the result in Rust.
//!
//! Ranking is all-or-nothing per invocation: a parse or call failure yields
//! no partial ranking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::Project;
use crate::llm_client::{Completion, CompletionRequest};
use crate::pipeline::prompts::{MATCH_PROMPT_TEMPLATE, MATCH_SYSTEM};
use crate::pipeline::skills::SkillRecord;
use crate::pipeline::{validator, PipelineError};

const MATCH_TEMPERATURE: f32 = 0.3;
const MATCH_MAX_TOKENS: u32 = 2000;

/// Catalogs larger than this are truncated to the first N entries in catalog
/// order when building the prompt — truncated, never sampled.
pub const MAX_CATALOG_PROMPT_PROJECTS: usize = 20;

/// Project descriptions are capped in the prompt to bound its size.
const DESCRIPTION_PROMPT_CHARS: usize = 300;

/// One scored project recommendation for a given SkillRecord.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub project_id: i64,
    pub score: u8,
    pub rationale: String,
    pub skill_alignment: Vec<String>,
    pub gaps: Vec<String>,
}

/// Aggregate narrative over the returned matches. The opportunity count is
/// computed from the match list, never taken from the model.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub total_matching_opportunities: usize,
    pub earnings_outlook: Option<String>,
    pub advancement_outlook: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub matches: Vec<MatchResult>,
    pub summary: MatchSummary,
}

/// Wire shape of the model's matching response.
#[derive(Debug, Deserialize)]
struct MatchResponseWire {
    matches: Vec<MatchResult>,
    #[serde(default)]
    earnings_outlook: Option<String>,
    #[serde(default)]
    advancement_outlook: Option<String>,
}

/// Builds the matching prompt over the first `MAX_CATALOG_PROMPT_PROJECTS`
/// catalog entries in catalog order.
pub fn build_match_prompt(record: &SkillRecord, catalog: &[Project], top_n: usize) -> String {
    let summaries: Vec<String> = catalog
        .iter()
        .take(MAX_CATALOG_PROMPT_PROJECTS)
        .map(project_summary)
        .collect();

    MATCH_PROMPT_TEMPLATE
        .replace(
            "{skill_record_json}",
            &serde_json::to_string_pretty(record).unwrap_or_default(),
        )
        .replace("{projects}", &summaries.join("\n\n"))
        .replace("{top_n}", &top_n.to_string())
}

fn project_summary(project: &Project) -> String {
    let description: String = project
        .description
        .as_deref()
        .unwrap_or("")
        .chars()
        .take(DESCRIPTION_PROMPT_CHARS)
        .collect();

    format!(
        "Project ID: {}\n\
         Name: {}\n\
         Client: {}\n\
         Sector: {}\n\
         Risk Level: {}\n\
         Duration: {} months\n\
         Resources Needed: {}\n\
         Deliverables: {}\n\
         Description: {}",
        project.id,
        project.name,
        project.client,
        project.sector.as_deref().unwrap_or("Not specified"),
        project.risk_level.as_deref().unwrap_or("Not specified"),
        project
            .duration_months
            .map(|d| d.to_string())
            .unwrap_or_else(|| "Not specified".to_string()),
        project
            .resource_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "Not specified".to_string()),
        project.deliverables.as_deref().unwrap_or("Not specified"),
        description,
    )
}

/// Ranks the catalog against the skill record.
///
/// An empty catalog short-circuits to an empty outcome with no LLM call.
/// Matches referencing a project_id absent from the catalog are dropped,
/// results are sorted score-descending with catalog order as tie-break, and
/// the list is truncated to `top_n`.
pub async fn match_projects(
    llm: &dyn Completion,
    record: &SkillRecord,
    catalog: &[Project],
    top_n: usize,
) -> Result<MatchOutcome, PipelineError> {
    if catalog.is_empty() {
        return Ok(MatchOutcome {
            matches: Vec::new(),
            summary: MatchSummary {
                total_matching_opportunities: 0,
                earnings_outlook: None,
                advancement_outlook: None,
            },
        });
    }

    let request = CompletionRequest {
        system: MATCH_SYSTEM,
        prompt: build_match_prompt(record, catalog, top_n),
        temperature: MATCH_TEMPERATURE,
        max_tokens: MATCH_MAX_TOKENS,
    };

    let raw = llm
        .complete(request)
        .await
        .map_err(|e| PipelineError::Matching {
            cause: e.to_string(),
        })?;

    let wire: MatchResponseWire = serde_json::from_str(validator::normalize(&raw)).map_err(|e| {
        PipelineError::Matching {
            cause: format!("unparseable matching response: {e}"),
        }
    })?;

    let matches = rank(wire.matches, catalog, top_n);

    Ok(MatchOutcome {
        summary: MatchSummary {
            total_matching_opportunities: matches.len(),
            earnings_outlook: wire.earnings_outlook,
            advancement_outlook: wire.advancement_outlook,
        },
        matches,
    })
}

/// Filters out matches to unknown projects, clamps scores, sorts by score
/// descending with catalog order as tie-break, and truncates to `top_n`.
fn rank(candidates: Vec<MatchResult>, catalog: &[Project], top_n: usize) -> Vec<MatchResult> {
    let catalog_index: HashMap<i64, usize> = catalog
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id, i))
        .collect();

    let mut indexed: Vec<(usize, MatchResult)> = candidates
        .into_iter()
        .filter_map(|m| match catalog_index.get(&m.project_id) {
            Some(&i) => Some((i, clamp_score(m))),
            None => {
                warn!(
                    project_id = m.project_id,
                    "dropping match to project absent from catalog"
                );
                None
            }
        })
        .collect();

    indexed.sort_by(|a, b| b.1.score.cmp(&a.1.score).then(a.0.cmp(&b.0)));
    indexed.truncate(top_n);
    indexed.into_iter().map(|(_, m)| m).collect()
}

fn clamp_score(mut m: MatchResult) -> MatchResult {
    if m.score > 100 {
        warn!(
            project_id = m.project_id,
            score = m.score,
            "match score above bounds, clamping to 100"
        );
        m.score = 100;
    }
    m
}
