//! Skill Vector Extractor — second LLM pass: narrative profile → SkillRecord.
//!
//! The model's numeric judgment is advisory: out-of-bound numbers are clamped
//! with a warning. Missing keys are NOT defaulted — a response without a
//! required field is a malformed response, never an empty record.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{Completion, CompletionRequest};
use crate::pipeline::analyzer::NarrativeProfile;
use crate::pipeline::prompts::SKILL_EXTRACT_PROMPT_TEMPLATE;
use crate::pipeline::{validator, PipelineError};

/// Stricter and colder than the analysis call: the output is a JSON object,
/// not prose, and it is short.
const EXTRACT_TEMPERATURE: f32 = 0.1;
const EXTRACT_MAX_TOKENS: u32 = 500;

const READINESS_MIN: u8 = 1;
const READINESS_MAX: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeniorityLevel {
    Graduate,
    Consultant,
    #[serde(rename = "Senior Consultant", alias = "SeniorConsultant")]
    SeniorConsultant,
    Manager,
    #[serde(rename = "Senior Manager", alias = "SeniorManager")]
    SeniorManager,
    Director,
}

/// Validated structured representation of a candidate's skills/experience.
/// Every list field is present (possibly empty) after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub technical_skills: Vec<String>,
    pub business_skills: Vec<String>,
    pub industry_knowledge: Vec<String>,
    pub soft_skills: Vec<String>,
    pub experience_years: f64,
    pub seniority_level: SeniorityLevel,
    pub consulting_readiness_score: u8,
}

pub fn build_skill_prompt(profile: &NarrativeProfile) -> String {
    SKILL_EXTRACT_PROMPT_TEMPLATE.replace("{profile}", profile.as_str())
}

/// Runs the structured extraction call and validates the response.
pub async fn extract_skills(
    llm: &dyn Completion,
    profile: &NarrativeProfile,
) -> Result<SkillRecord, PipelineError> {
    let request = CompletionRequest {
        system: JSON_ONLY_SYSTEM,
        prompt: build_skill_prompt(profile),
        temperature: EXTRACT_TEMPERATURE,
        max_tokens: EXTRACT_MAX_TOKENS,
    };

    let raw = llm
        .complete(request)
        .await
        .map_err(|e| PipelineError::Analysis {
            cause: format!("skill extraction call failed: {e}"),
        })?;

    parse_skill_record(&raw)
}

/// Normalizes and parses a raw model response into a SkillRecord.
/// Invalid JSON or a missing required key fails; out-of-bound numbers clamp.
pub fn parse_skill_record(raw: &str) -> Result<SkillRecord, PipelineError> {
    let candidate = validator::normalize(raw);

    let record: SkillRecord =
        serde_json::from_str(candidate).map_err(|_| PipelineError::MalformedResponse {
            snippet: snippet(candidate),
        })?;

    Ok(clamp_advisory_numbers(record))
}

fn clamp_advisory_numbers(mut record: SkillRecord) -> SkillRecord {
    if record.consulting_readiness_score < READINESS_MIN {
        warn!(
            score = record.consulting_readiness_score,
            "consulting_readiness_score below bounds, clamping to {READINESS_MIN}"
        );
        record.consulting_readiness_score = READINESS_MIN;
    } else if record.consulting_readiness_score > READINESS_MAX {
        warn!(
            score = record.consulting_readiness_score,
            "consulting_readiness_score above bounds, clamping to {READINESS_MAX}"
        );
        record.consulting_readiness_score = READINESS_MAX;
    }

    if record.experience_years < 0.0 {
        warn!(
            years = record.experience_years,
            "negative experience_years, clamping to 0"
        );
        record.experience_years = 0.0;
    }

    record
}

/// Bounded, char-safe excerpt of the offending response for error reports.
fn snippet(text: &str) -> String {
    const MAX_CHARS: usize = 160;
    if text.chars().count() <= MAX_CHARS {
        text.to_string()
    } else {
        let cut: String = text.chars().take(MAX_CHARS).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::ScriptedLlm;

    fn valid_json(score: i64, years: f64) -> String {
        format!(
            r#"{{
                "technical_skills": ["Rust", "SQL"],
                "business_skills": ["Strategy"],
                "industry_knowledge": ["Fintech"],
                "soft_skills": ["Communication"],
                "experience_years": {years},
                "seniority_level": "Senior Consultant",
                "consulting_readiness_score": {score}
            }}"#
        )
    }

    #[test]
    fn test_parses_valid_record() {
        let record = parse_skill_record(&valid_json(8, 7.5)).unwrap();
        assert_eq!(record.technical_skills, vec!["Rust", "SQL"]);
        assert_eq!(record.seniority_level, SeniorityLevel::SeniorConsultant);
        assert_eq!(record.consulting_readiness_score, 8);
        assert!((record.experience_years - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parses_fenced_record() {
        let fenced = format!("```json\n{}\n```", valid_json(8, 7.5));
        let record = parse_skill_record(&fenced).unwrap();
        assert_eq!(record.consulting_readiness_score, 8);
    }

    #[test]
    fn test_missing_required_key_is_malformed() {
        let missing_soft_skills = r#"{
            "technical_skills": ["Rust"],
            "business_skills": [],
            "industry_knowledge": [],
            "experience_years": 3,
            "seniority_level": "Consultant",
            "consulting_readiness_score": 5
        }"#;
        match parse_skill_record(missing_soft_skills) {
            Err(PipelineError::MalformedResponse { snippet }) => {
                assert!(!snippet.is_empty());
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_prose_response_is_malformed() {
        match parse_skill_record("Here are the skills I found: Rust, SQL.") {
            Err(PipelineError::MalformedResponse { .. }) => {}
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_readiness_above_bounds_clamps_to_ten() {
        let record = parse_skill_record(&valid_json(15, 5.0)).unwrap();
        assert_eq!(record.consulting_readiness_score, 10);
    }

    #[test]
    fn test_readiness_below_bounds_clamps_to_one() {
        let record = parse_skill_record(&valid_json(0, 5.0)).unwrap();
        assert_eq!(record.consulting_readiness_score, 1);
    }

    #[test]
    fn test_negative_experience_years_clamps_to_zero() {
        let record = parse_skill_record(&valid_json(5, -2.0)).unwrap();
        assert_eq!(record.experience_years, 0.0);
    }

    #[test]
    fn test_wire_round_trip_preserves_all_fields() {
        let record = parse_skill_record(&valid_json(8, 7.5)).unwrap();
        let wire = serde_json::to_string(&record).unwrap();
        let back: SkillRecord = serde_json::from_str(&wire).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_seniority_wire_form_is_human_readable() {
        let wire = serde_json::to_string(&SeniorityLevel::SeniorManager).unwrap();
        assert_eq!(wire, r#""Senior Manager""#);
        let back: SeniorityLevel = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, SeniorityLevel::SeniorManager);
    }

    #[tokio::test]
    async fn test_extract_skills_end_to_end_with_scripted_model() {
        let llm = ScriptedLlm::new(vec![format!("```json\n{}\n```", valid_json(9, 10.0))]);
        let profile = NarrativeProfile::new("## PERSONAL SUMMARY\nStrong.");
        let record = extract_skills(&llm, &profile).await.unwrap();
        assert_eq!(record.consulting_readiness_score, 9);
    }
}
