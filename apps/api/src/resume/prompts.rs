// All LLM prompt constants for the resume stages.
// Reuses RESUME_SCHEMA and NON_FABRICATION_INSTRUCTION from llm_client::prompts.

/// Resume data extraction. Replace `{schema}` and `{resume_text}`.
pub const RESUME_EXTRACTION_SYSTEM: &str =
    "You are a meticulous resume parser that converts resumes into structured data.";

pub const RESUME_EXTRACTION_TEMPLATE: &str = r#"RESUME DATA EXTRACTION

Convert the resume text below into structured data.

Return a JSON object with this EXACT schema:
{schema}

RULES:
- Copy every date string exactly as written ("Jan 2020", "2019 - Present"). Do not
  convert dates to another format.
- A role that is still current has no end_date.
- Every bullet, achievement or responsibility is its own array element. Never merge
  several bullets into one paragraph.
- Keep skill groupings and category names from the resume when it has them.
  Otherwise group skills into sensible categories (Languages, Frameworks, Tools, ...).
- When the candidate worked at the same company in separate, non-contiguous periods,
  emit one entry with every period in "date_ranges" instead of start_date/end_date.
- Leave out any optional field the resume does not contain. Never write placeholder
  values such as "N/A" or "Unknown".

RESUME TEXT:
{resume_text}"#;

/// Tailoring. Replace `{schema}`, `{resume_json}` and `{job_description}`.
pub const RESUME_TAILOR_SYSTEM: &str =
    "You are an expert resume writer who tailors resumes to specific roles without exaggeration.";

pub const RESUME_TAILOR_TEMPLATE: &str = r#"RESUME TAILORING

Tailor the candidate's resume to the job description below.

WHAT TO CHANGE:
- Rewrite the summary so it targets this specific role.
- Within each role, reword bullets to foreground the achievements most relevant to the
  job, and order them from most to least relevant. Wording and order may change; facts
  may not.
- Reorder skill groups, the items inside each group, and projects by relevance.
- You may drop weakly relevant projects, but keep at least 2 projects (or all of them
  if there are fewer than 2).

WHAT MUST NOT CHANGE:
- Name, email, phone, location and links.
- Every education entry and every certification, copied exactly.
- Every role: same company, same title, same dates, same location. Do not remove roles.

Return the complete tailored resume as a JSON object with this EXACT schema:
{schema}

CURRENT RESUME (JSON):
{resume_json}

JOB DESCRIPTION:
{job_description}"#;

/// Editing. Replace `{schema}`, `{resume_json}` and `{instruction}`.
pub const RESUME_EDIT_SYSTEM: &str =
    "You are a careful resume editor who applies exactly the change a user asks for.";

pub const RESUME_EDIT_TEMPLATE: &str = r#"RESUME EDIT

Apply the user's instruction to the resume below.

RULES:
- Apply ONLY the change the instruction asks for.
- Every field the instruction does not target must be returned exactly as it is,
  including the full work history, all dates and all contact details.
- New names, titles, skills or certifications may only come from the instruction itself.

Return the complete edited resume as a JSON object with this EXACT schema:
{schema}

CURRENT RESUME (JSON):
{resume_json}

USER INSTRUCTION:
{instruction}"#;
