// All LLM prompt constants for the pipeline stages.
// Reuses cross-cutting fragments from llm_client::prompts.
//
// The analysis section headers are a contract with the model: they must stay
// literal and stable so downstream consumers can anchor on them.

/// System prompt for the narrative CV analysis call.
pub const ANALYSIS_SYSTEM: &str =
    "You are an expert HR consultant and career advisor. \
    You analyze CVs for a consulting staffing platform and produce thorough, \
    honest assessments. Follow the requested section structure exactly.";

/// The literal section headers the analysis prompt requests.
/// Exposed so prompt tests and any later anchored extraction agree on them.
pub const ANALYSIS_SECTION_HEADERS: [&str; 9] = [
    "## PERSONAL SUMMARY",
    "## KEY SKILLS & EXPERTISE",
    "## EXPERIENCE LEVEL",
    "## SECTOR EXPERIENCE",
    "## EDUCATION & CERTIFICATIONS",
    "## STRENGTHS",
    "## POTENTIAL GROWTH AREAS",
    "## CONSULTING READINESS",
    "## RECOMMENDED ROLE TYPES",
];

/// CV analysis prompt template. Replace `{cv_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following CV and provide a comprehensive analysis.

CV Content:
{cv_text}

Provide a detailed analysis in the following structure:

## PERSONAL SUMMARY
A 2-3 sentence summary of this person's professional profile.

## KEY SKILLS & EXPERTISE
List the top 10 most relevant skills found in this CV, categorized as:
- Technical Skills: (programming languages, software, tools)
- Business Skills: (management, strategy, analysis)
- Industry Knowledge: (sectors, domains)
- Soft Skills: (leadership, communication, etc.)

## EXPERIENCE LEVEL
- Years of Experience: [estimate]
- Seniority Level: [Graduate/Consultant/Senior Consultant/Manager/Senior Manager/Director]
- Career Progression: [brief assessment]

## SECTOR EXPERIENCE
List relevant industry sectors this person has worked in.

## EDUCATION & CERTIFICATIONS
Highlight key educational background and certifications.

## STRENGTHS
Top 5 key strengths based on the CV.

## POTENTIAL GROWTH AREAS
Areas where this person could develop further.

## CONSULTING READINESS
Rate from 1-10 how ready this person is for consulting work and explain why.

## RECOMMENDED ROLE TYPES
What types of consulting projects would be best suited for this person?

Format your response clearly with the headers above."#;

/// Skill extraction prompt template. Replace `{profile}` before sending.
/// Paired with `llm_client::prompts::JSON_ONLY_SYSTEM` — the response must be
/// a single JSON object matching the SkillRecord shape, nothing else.
pub const SKILL_EXTRACT_PROMPT_TEMPLATE: &str = r#"From the following CV analysis, extract the candidate's skill profile in a structured format.

CV Analysis:
{profile}

Return a JSON object with this EXACT schema (no extra fields, no missing fields):
{
    "technical_skills": ["skill1", "skill2"],
    "business_skills": ["skill1", "skill2"],
    "industry_knowledge": ["sector1", "sector2"],
    "soft_skills": ["skill1", "skill2"],
    "experience_years": 7.5,
    "seniority_level": "Senior Consultant",
    "consulting_readiness_score": 8
}

Rules:
- Every list field must be present, even if empty.
- "seniority_level" must be exactly one of: "Graduate", "Consultant", "Senior Consultant", "Manager", "Senior Manager", "Director".
- "consulting_readiness_score" is an integer from 1 to 10.
- Only return valid JSON, no other text."#;

/// System prompt for project matching — enforces JSON-only output.
pub const MATCH_SYSTEM: &str =
    "You are an expert consultant staffing specialist. \
    You evaluate how well a candidate's skill profile fits available projects. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Project matching prompt template.
/// Replace: {skill_record_json}, {projects}, {top_n}
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Based on the candidate skill profile below, identify the best project matches.

CANDIDATE SKILL PROFILE:
{skill_record_json}

AVAILABLE PROJECTS:
{projects}

Evaluate each project and return the top {top_n} best matches as a JSON object:
{
  "matches": [
    {
      "project_id": 42,
      "score": 87,
      "rationale": "Why this is a good match (2-3 sentences)",
      "skill_alignment": ["skill or requirement that aligns"],
      "gaps": ["gap or development opportunity"]
    }
  ],
  "earnings_outlook": "Potential earnings increase if matched to these projects",
  "advancement_outlook": "Career advancement potential across these matches"
}

HARD RULES:
1. "project_id" MUST be one of the Project ID values listed above — never invent one.
2. "score" is an integer from 0 to 100 — be specific and realistic.
3. Order matches from strongest to weakest.
4. Return at most {top_n} matches."#;
