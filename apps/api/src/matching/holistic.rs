//! Holistic Comparator: model-judged fit across experience, qualifications,
//! cultural fit and career trajectory. Re-reads the original documents rather
//! than the extracted keywords.

use std::sync::Arc;

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::json_system;
use crate::llm_client::{evaluate, TextJudge};
use crate::matching::prompts::{HOLISTIC_COMPARISON_SYSTEM, HOLISTIC_COMPARISON_TEMPLATE};
use crate::models::HolisticComparison;

pub struct HolisticComparator {
    judge: Arc<dyn TextJudge>,
}

impl HolisticComparator {
    pub fn new(judge: Arc<dyn TextJudge>) -> Self {
        Self { judge }
    }

    pub async fn compare(
        &self,
        resume: &str,
        job_description: &str,
    ) -> Result<HolisticComparison, AppError> {
        let prompt = HOLISTIC_COMPARISON_TEMPLATE
            .replace("{resume}", resume)
            .replace("{job_description}", job_description);

        let comparison: HolisticComparison = evaluate(
            self.judge.as_ref(),
            "holistic comparison",
            &prompt,
            &json_system(HOLISTIC_COMPARISON_SYSTEM),
            |comparison: &mut HolisticComparison| comparison.check(),
        )
        .await?;

        info!(
            "Holistic score: {} (experience={}, qualifications={}, culture={}, trajectory={})",
            comparison.overall_score,
            comparison.experience_match.score,
            comparison.qualification_match.score,
            comparison.cultural_fit.score,
            comparison.career_trajectory.score
        );
        Ok(comparison)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::FakeJudge;

    const REPLY: &str = r#"{
        "overall_score": 68,
        "experience_match": {"score": 72, "analysis": "Four years of backend work."},
        "qualification_match": {"score": 60, "analysis": "No Kubernetes exposure."},
        "cultural_fit": {"score": 75, "analysis": "Startup background."},
        "career_trajectory": {"score": 70, "analysis": "Natural step up."},
        "strengths": ["Python depth"],
        "areas_for_improvement": ["Container orchestration"],
        "overall_assessment": "Capable backend engineer with an infrastructure gap."
    }"#;

    #[tokio::test]
    async fn test_compare_parses_all_dimensions() {
        let judge = Arc::new(FakeJudge::new().respond("HOLISTIC COMPARISON", REPLY));
        let comparison = HolisticComparator::new(judge)
            .compare("resume text", "job text")
            .await
            .unwrap();
        assert_eq!(comparison.overall_score, 68.0);
        assert_eq!(comparison.qualification_match.score, 60.0);
        assert_eq!(comparison.strengths, vec!["Python depth"]);
    }

    #[tokio::test]
    async fn test_compare_retries_missing_dimension() {
        let missing = r#"{"overall_score": 68, "experience_match": {"score": 72, "analysis": "x"},
            "overall_assessment": "incomplete"}"#;
        let judge = Arc::new(
            FakeJudge::new().respond_sequence("HOLISTIC COMPARISON", vec![missing, REPLY]),
        );
        let comparison = HolisticComparator::new(judge.clone())
            .compare("resume text", "job text")
            .await
            .unwrap();
        assert_eq!(comparison.career_trajectory.score, 70.0);
        assert_eq!(judge.calls(), 2);
    }

    #[tokio::test]
    async fn test_compare_embeds_both_documents() {
        let judge = Arc::new(
            FakeJudge::new().respond("RESUME:\nJane's resume\n\nJOB DESCRIPTION:\nAcme role", REPLY),
        );
        HolisticComparator::new(judge.clone())
            .compare("Jane's resume", "Acme role")
            .await
            .unwrap();
        assert_eq!(judge.calls(), 1);
    }
}
