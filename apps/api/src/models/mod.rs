//! Structured output contract shared by every pipeline stage.

pub mod analysis;
pub mod comparison;
pub mod keywords;
pub mod resume;

pub use analysis::{DetailedAnalysis, KeywordAnalysis, ResumeAnalysisResult, ScoreBreakdown};
pub use comparison::{DimensionScore, HolisticComparison};
pub use keywords::{DocumentKind, ExtractedKeywords, KeywordCategory, KeywordComparison};
pub use resume::{
    Certification, DateRange, Education, Link, Project, ResumeData, SkillGroup, Tenure,
    WorkExperience,
};

use serde::{Deserialize, Deserializer};

/// Models emit `null` for empty lists often enough that the contract treats
/// `null` and a missing key the same as `[]`.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Scores on the wire are 0–100.
pub(crate) fn check_score(field: &str, score: f64) -> Result<(), String> {
    if score.is_finite() && (0.0..=100.0).contains(&score) {
        Ok(())
    } else {
        Err(format!("{field} must be within 0–100, got {score}"))
    }
}
