use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::null_as_empty;

/// Which kind of document a keyword extraction reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    JobDescription,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::JobDescription => "job_description",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six parallel keyword lists, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    TechnicalSkills,
    SoftSkills,
    Certifications,
    ExperienceKeywords,
    EducationKeywords,
    IndustryTerms,
}

impl KeywordCategory {
    pub const ALL: [KeywordCategory; 6] = [
        KeywordCategory::TechnicalSkills,
        KeywordCategory::SoftSkills,
        KeywordCategory::Certifications,
        KeywordCategory::ExperienceKeywords,
        KeywordCategory::EducationKeywords,
        KeywordCategory::IndustryTerms,
    ];

    pub fn field_name(self) -> &'static str {
        match self {
            KeywordCategory::TechnicalSkills => "technical_skills",
            KeywordCategory::SoftSkills => "soft_skills",
            KeywordCategory::Certifications => "certifications",
            KeywordCategory::ExperienceKeywords => "experience_keywords",
            KeywordCategory::EducationKeywords => "education_keywords",
            KeywordCategory::IndustryTerms => "industry_terms",
        }
    }
}

/// Categorized, normalized keywords from one document.
/// Every list is present (possibly empty) and duplicate-free once normalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedKeywords {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub technical_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub soft_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub experience_keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub education_keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub industry_terms: Vec<String>,
}

impl ExtractedKeywords {
    pub fn get(&self, category: KeywordCategory) -> &[String] {
        match category {
            KeywordCategory::TechnicalSkills => &self.technical_skills,
            KeywordCategory::SoftSkills => &self.soft_skills,
            KeywordCategory::Certifications => &self.certifications,
            KeywordCategory::ExperienceKeywords => &self.experience_keywords,
            KeywordCategory::EducationKeywords => &self.education_keywords,
            KeywordCategory::IndustryTerms => &self.industry_terms,
        }
    }

    pub fn get_mut(&mut self, category: KeywordCategory) -> &mut Vec<String> {
        match category {
            KeywordCategory::TechnicalSkills => &mut self.technical_skills,
            KeywordCategory::SoftSkills => &mut self.soft_skills,
            KeywordCategory::Certifications => &mut self.certifications,
            KeywordCategory::ExperienceKeywords => &mut self.experience_keywords,
            KeywordCategory::EducationKeywords => &mut self.education_keywords,
            KeywordCategory::IndustryTerms => &mut self.industry_terms,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (KeywordCategory, &[String])> {
        KeywordCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Total keywords across all categories.
    pub fn len(&self) -> usize {
        self.iter().map(|(_, list)| list.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Case-insensitive membership within one category.
    pub fn contains(&self, category: KeywordCategory, keyword: &str) -> bool {
        self.get(category)
            .iter()
            .any(|k| k.eq_ignore_ascii_case(keyword))
    }
}

/// Keyword-level comparison of a resume against a job description.
///
/// Every job-side keyword lands in exactly one of `matching_keywords` or
/// `missing_keywords`, within its own category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordComparison {
    pub keyword_match_score: f64,
    #[serde(default)]
    pub matching_keywords: ExtractedKeywords,
    #[serde(default)]
    pub missing_keywords: ExtractedKeywords,
    #[serde(default)]
    pub insight: String,
}
