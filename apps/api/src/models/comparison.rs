use serde::{Deserialize, Serialize};

use crate::models::{check_score, null_as_empty};

/// One judged dimension: a 0–100 score and its justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub score: f64,
    pub analysis: String,
}

/// Model-judged qualitative fit across four dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolisticComparison {
    pub overall_score: f64,
    pub experience_match: DimensionScore,
    pub qualification_match: DimensionScore,
    pub cultural_fit: DimensionScore,
    pub career_trajectory: DimensionScore,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub areas_for_improvement: Vec<String>,
    pub overall_assessment: String,
}

impl HolisticComparison {
    pub fn dimensions(&self) -> [(&'static str, &DimensionScore); 4] {
        [
            ("experience_match", &self.experience_match),
            ("qualification_match", &self.qualification_match),
            ("cultural_fit", &self.cultural_fit),
            ("career_trajectory", &self.career_trajectory),
        ]
    }

    /// Schema conformance only; the numbers themselves are opaque judgments.
    pub fn check(&self) -> Result<(), String> {
        check_score("overall_score", self.overall_score)?;
        for (name, dimension) in self.dimensions() {
            check_score(name, dimension.score)?;
            if dimension.analysis.trim().is_empty() {
                return Err(format!("{name} is missing its analysis"));
            }
        }
        Ok(())
    }
}
