// Shared prompt fragments.
// Each stage that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Appended to every system prompt that expects structured output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Non-fabrication rule shared by the rewriting agents.
pub const NON_FABRICATION_INSTRUCTION: &str = "\
    CRITICAL: You may reorder, reword and re-emphasize existing content only. \
    NEVER introduce a company, job title, degree, certification, skill or project \
    that is not present in the input data. \
    NEVER invent metrics, dates, or achievements. \
    If a change would require a fact that is not in the input, leave that content as it is.";

/// Canonical form of the resume schema, embedded in every prompt that reads or
/// writes `ResumeData`.
pub const RESUME_SCHEMA: &str = r#"{
  "name": "Full Name",
  "email": "optional",
  "phone": "optional",
  "location": "optional",
  "summary": "optional",
  "work_experience": [
    {
      "company": "Company",
      "title": "Job Title",
      "location": "optional",
      "start_date": "date string exactly as written in the source",
      "end_date": "date string, omitted for a current role",
      "date_ranges": [{"start_date": "...", "end_date": "..."}],
      "description": ["one bullet per element"]
    }
  ],
  "education": [
    {
      "institution": "School",
      "degree": "Degree",
      "field_of_study": "optional",
      "location": "optional",
      "start_date": "optional",
      "end_date": "optional",
      "gpa": "optional",
      "details": ["one item per element"]
    }
  ],
  "skills": [{"category": "Category", "items": ["Skill"]}],
  "certifications": [{"name": "Certification", "issuer": "optional", "date": "optional"}],
  "projects": [
    {
      "name": "Project",
      "description": ["one bullet per element"],
      "technologies": ["optional"],
      "link": "optional"
    }
  ],
  "links": [{"label": "GitHub", "url": "https://..."}]
}"#;

/// Builds a system prompt from a role statement plus the JSON-only rule.
pub fn json_system(role: &str) -> String {
    format!("{role} {JSON_ONLY_INSTRUCTION}")
}
