//! Scoring Orchestrator: runs the full resume/job analysis.
//!
//! Flow: extract keywords (resume ∥ job) → keyword comparison ∥ holistic
//!       comparison → weighted aggregate → rating band → recommendations.
//!
//! Any stage failure fails the whole analysis. There is no partial result.

use std::sync::Arc;

use tracing::{info, Instrument};
use uuid::Uuid;

use crate::errors::{require_text, AppError};
use crate::llm_client::TextJudge;
use crate::matching::comparator::KeywordComparator;
use crate::matching::extractor::{extract_from_both, KeywordSource};
use crate::matching::holistic::HolisticComparator;
use crate::models::{
    DetailedAnalysis, HolisticComparison, KeywordAnalysis, KeywordComparison,
    ResumeAnalysisResult, ScoreBreakdown,
};

/// Fixed aggregation weights. User-facing scores depend on these exactly.
pub const KEYWORD_WEIGHT: f64 = 0.4;
pub const HOLISTIC_WEIGHT: f64 = 0.6;

pub const MAX_RECOMMENDATIONS: usize = 5;
const MAX_LISTED_SKILLS: usize = 5;
/// Dimension scores below this produce an advisory.
const ADVISORY_THRESHOLD: f64 = 70.0;

/// Rating bands, highest first: (minimum score, label).
const RATING_BANDS: &[(u32, &str)] = &[
    (90, "Excellent Match"),
    (75, "Strong Match"),
    (60, "Good Match"),
    (45, "Moderate Match"),
];
const LOWEST_RATING: &str = "Weak Match";

pub struct ResumeAnalyzer {
    keywords: Arc<dyn KeywordSource>,
    keyword_comparator: KeywordComparator,
    holistic_comparator: HolisticComparator,
}

impl ResumeAnalyzer {
    pub fn new(keywords: Arc<dyn KeywordSource>, judge: Arc<dyn TextJudge>) -> Self {
        Self {
            keywords,
            keyword_comparator: KeywordComparator::new(judge.clone()),
            holistic_comparator: HolisticComparator::new(judge),
        }
    }

    /// Runs the full analysis. Dropping the returned future abandons every
    /// in-flight model call for this invocation.
    pub async fn analyze(
        &self,
        resume: &str,
        job_description: &str,
    ) -> Result<ResumeAnalysisResult, AppError> {
        require_text("resume", resume)?;
        require_text("job_description", job_description)?;

        let span = tracing::info_span!("analyze_resume", analysis_id = %Uuid::new_v4());
        async {
            // Step 1: keywords from both documents, concurrently
            let (resume_keywords, job_keywords) =
                extract_from_both(self.keywords.as_ref(), resume, job_description).await?;

            // Step 2: both comparisons, concurrently; neither depends on the other
            let (keyword, holistic) = tokio::try_join!(
                self.keyword_comparator.compare(&resume_keywords, &job_keywords),
                self.holistic_comparator.compare(resume, job_description),
            )?;

            // Step 3–5: aggregate
            let result = aggregate(keyword, holistic);
            info!("Analysis complete: {}", result.description);
            Ok::<_, AppError>(result)
        }
        .instrument(span)
        .await
    }
}

/// `round(keyword * 0.4 + holistic * 0.6)`, clamped to 0–100.
pub fn total_score(keyword_match_score: f64, holistic_score: f64) -> u32 {
    (keyword_match_score * KEYWORD_WEIGHT + holistic_score * HOLISTIC_WEIGHT)
        .round()
        .clamp(0.0, 100.0) as u32
}

/// Step function from total score to rating label.
pub fn rating_band(score: u32) -> &'static str {
    RATING_BANDS
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, label)| *label)
        .unwrap_or(LOWEST_RATING)
}

/// Builds the recommendation list in fixed priority order, capped at five.
pub fn build_recommendations(
    keyword: &KeywordComparison,
    holistic: &HolisticComparison,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    let missing_technical = &keyword.missing_keywords.technical_skills;
    if !missing_technical.is_empty() {
        let top: Vec<&str> = missing_technical
            .iter()
            .take(MAX_LISTED_SKILLS)
            .map(String::as_str)
            .collect();
        recommendations.push(format!(
            "Add or highlight experience with these technical skills: {}",
            top.join(", ")
        ));
    }

    let missing_certifications = &keyword.missing_keywords.certifications;
    if !missing_certifications.is_empty() {
        recommendations.push(format!(
            "Consider obtaining or listing these certifications: {}",
            missing_certifications.join(", ")
        ));
    }

    if holistic.experience_match.score < ADVISORY_THRESHOLD {
        recommendations.push(
            "Emphasize work experience that maps directly to the role's responsibilities, \
             with measurable outcomes"
                .to_string(),
        );
    }

    if holistic.qualification_match.score < ADVISORY_THRESHOLD {
        recommendations.push(
            "Make required qualifications such as education, certifications and years of \
             experience easier to find"
                .to_string(),
        );
    }

    recommendations.push(
        "Tailor your resume to the job description, mirroring its terminology where it is accurate"
            .to_string(),
    );

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

/// Combines the two comparisons into the terminal result.
pub fn aggregate(keyword: KeywordComparison, holistic: HolisticComparison) -> ResumeAnalysisResult {
    let total = total_score(keyword.keyword_match_score, holistic.overall_score);
    let rating = rating_band(total);
    let recommendations = build_recommendations(&keyword, &holistic);

    ResumeAnalysisResult {
        total_score: total,
        score_breakdown: ScoreBreakdown {
            keyword_match_score: keyword.keyword_match_score,
            holistic_score: holistic.overall_score,
        },
        description: format!("{rating} ({total}/100): {}", holistic.overall_assessment),
        strengths: holistic.strengths,
        areas_for_improvement: holistic.areas_for_improvement,
        detailed_analysis: DetailedAnalysis {
            keyword_analysis: KeywordAnalysis {
                score: keyword.keyword_match_score,
                matching_keywords: keyword.matching_keywords,
                missing_keywords: keyword.missing_keywords,
                insight: keyword.insight,
            },
            experience_match: holistic.experience_match,
            qualification_match: holistic.qualification_match,
            cultural_fit: holistic.cultural_fit,
            career_trajectory: holistic.career_trajectory,
        },
        recommendations,
    }
}
