// All LLM prompt constants for the matching stages.
// Each template names its stage on the first line; tests route fixtures on it.

/// Keyword extraction. Replace `{document_kind}` and `{document}`.
pub const KEYWORD_EXTRACTION_SYSTEM: &str =
    "You are an expert technical recruiter and ATS keyword analyst.";

pub const KEYWORD_EXTRACTION_TEMPLATE: &str = r#"KEYWORD EXTRACTION
DOCUMENT TYPE: {document_kind}

Extract EVERY keyword from the document below into these six categories. Be
exhaustive, not illustrative: every technology, tool, language, framework, soft
skill, certification, experience phrase, education term and domain term that is
mentioned must appear in some category.

Return a JSON object with this EXACT schema (no extra fields):
{
  "technical_skills": ["Python", "Kubernetes"],
  "soft_skills": ["Cross-functional collaboration"],
  "certifications": ["AWS Certified Solutions Architect"],
  "experience_keywords": ["5+ years backend development"],
  "education_keywords": ["Bachelor's Degree", "Computer Science"],
  "industry_terms": ["FinTech"]
}

NORMALIZATION RULES:
- Use one canonical spelling per concept: "JS" -> "JavaScript", "k8s" -> "Kubernetes",
  "Postgres" -> "PostgreSQL", "Amazon Web Services" -> "AWS".
- No duplicates within a list.
- A category with nothing in it is an empty list, never null.

DOCUMENT:
{document}"#;

/// Keyword comparison. Replace `{resume_keywords}` and `{job_keywords}`.
pub const KEYWORD_COMPARISON_SYSTEM: &str =
    "You are an ATS matching engine that compares keyword sets precisely.";

pub const KEYWORD_COMPARISON_TEMPLATE: &str = r#"KEYWORD COMPARISON

Compare the candidate's keywords against the job's keywords.

RESUME KEYWORDS:
{resume_keywords}

JOB DESCRIPTION KEYWORDS:
{job_keywords}

Return a JSON object with this EXACT schema:
{
  "keyword_match_score": 0-100,
  "matching_keywords": {"technical_skills": [], "soft_skills": [], "certifications": [], "experience_keywords": [], "education_keywords": [], "industry_terms": []},
  "missing_keywords": {"technical_skills": [], "soft_skills": [], "certifications": [], "experience_keywords": [], "education_keywords": [], "industry_terms": []},
  "insight": "Two or three sentences on the keyword fit."
}

PARTITION RULES (hard requirements):
- Every JOB DESCRIPTION keyword must appear in EXACTLY ONE of matching_keywords or
  missing_keywords, under the SAME category it has above, spelled exactly as above.
- A job keyword is matching when the resume has it or an obvious synonym of it.
- Do not list resume-only keywords anywhere.

SCORING RUBRIC:
- Technical skills and certifications weigh the most.
- Experience and education keywords weigh moderately.
- Soft skills and industry terms weigh the least."#;

/// Holistic comparison. Replace `{resume}` and `{job_description}`.
pub const HOLISTIC_COMPARISON_SYSTEM: &str =
    "You are a senior hiring manager who evaluates candidates fairly and specifically.";

pub const HOLISTIC_COMPARISON_TEMPLATE: &str = r#"HOLISTIC COMPARISON

Evaluate how well this candidate fits the role beyond keyword overlap. Score each
dimension independently from 0 to 100 and justify every score with specific
evidence from the two documents.

Return a JSON object with this EXACT schema:
{
  "overall_score": 0-100,
  "experience_match": {"score": 0-100, "analysis": "..."},
  "qualification_match": {"score": 0-100, "analysis": "..."},
  "cultural_fit": {"score": 0-100, "analysis": "..."},
  "career_trajectory": {"score": 0-100, "analysis": "..."},
  "strengths": ["..."],
  "areas_for_improvement": ["..."],
  "overall_assessment": "One short paragraph."
}

DIMENSIONS:
- experience_match: depth and relevance of past roles to the responsibilities.
- qualification_match: required and preferred qualifications, education, certifications.
- cultural_fit: working style and values signalled in both documents.
- career_trajectory: whether this role is a natural next step.

RESUME:
{resume}

JOB DESCRIPTION:
{job_description}"#;
