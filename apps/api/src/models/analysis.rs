use serde::{Deserialize, Serialize};

use crate::models::{DimensionScore, ExtractedKeywords};

/// The two source scores behind `total_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_match_score: f64,
    pub holistic_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub score: f64,
    pub matching_keywords: ExtractedKeywords,
    pub missing_keywords: ExtractedKeywords,
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub keyword_analysis: KeywordAnalysis,
    pub experience_match: DimensionScore,
    pub qualification_match: DimensionScore,
    pub cultural_fit: DimensionScore,
    pub career_trajectory: DimensionScore,
}

/// Terminal output of scoring. Built once by the orchestrator, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysisResult {
    pub total_score: u32,
    pub score_breakdown: ScoreBreakdown,
    pub description: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub detailed_analysis: DetailedAnalysis,
    /// At most five, highest priority first.
    pub recommendations: Vec<String>,
}
