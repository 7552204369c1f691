//! Keyword Extractor: turns one document into a categorized, normalized keyword set.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::errors::{require_text, AppError};
use crate::llm_client::prompts::json_system;
use crate::llm_client::{evaluate, TextJudge};
use crate::matching::normalize::normalize_keywords;
use crate::matching::prompts::{KEYWORD_EXTRACTION_SYSTEM, KEYWORD_EXTRACTION_TEMPLATE};
use crate::models::{DocumentKind, ExtractedKeywords};

/// Anything that can reduce a document to `ExtractedKeywords`.
///
/// Carried by the orchestrator as `Arc<dyn KeywordSource>` so the model-backed
/// extractor can be wrapped with a fallback without touching callers.
#[async_trait]
pub trait KeywordSource: Send + Sync {
    async fn extract(&self, text: &str, kind: DocumentKind) -> Result<ExtractedKeywords, AppError>;
}

/// Model-backed extractor. No silent fallback: a stage that never produces a
/// parseable result surfaces a hard error.
pub struct KeywordExtractor {
    judge: Arc<dyn TextJudge>,
}

impl KeywordExtractor {
    pub fn new(judge: Arc<dyn TextJudge>) -> Self {
        Self { judge }
    }
}

#[async_trait]
impl KeywordSource for KeywordExtractor {
    async fn extract(&self, text: &str, kind: DocumentKind) -> Result<ExtractedKeywords, AppError> {
        require_text(kind.as_str(), text)?;

        let prompt = KEYWORD_EXTRACTION_TEMPLATE
            .replace("{document_kind}", kind.as_str())
            .replace("{document}", text);

        let keywords: ExtractedKeywords = evaluate(
            self.judge.as_ref(),
            "keyword extraction",
            &prompt,
            &json_system(KEYWORD_EXTRACTION_SYSTEM),
            |keywords: &mut ExtractedKeywords| {
                normalize_keywords(keywords);
                Ok(())
            },
        )
        .await?;

        info!("Extracted {} keywords from {}", keywords.len(), kind);
        Ok(keywords)
    }
}

/// Extracts resume and job keywords concurrently. Fails if either side fails;
/// the other in-flight extraction is dropped.
pub async fn extract_from_both(
    source: &dyn KeywordSource,
    resume: &str,
    job_description: &str,
) -> Result<(ExtractedKeywords, ExtractedKeywords), AppError> {
    tokio::try_join!(
        source.extract(resume, DocumentKind::Resume),
        source.extract(job_description, DocumentKind::JobDescription),
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::*;
    use crate::llm_client::fake::FakeJudge;

    const RESUME_KEYWORDS: &str = r#"{
        "technical_skills": ["Python", "Django", "AWS", "python", "JS"],
        "soft_skills": ["Mentoring"],
        "certifications": [],
        "experience_keywords": ["Backend development"],
        "education_keywords": ["Computer Science"],
        "industry_terms": null
    }"#;

    const JOB_KEYWORDS: &str = r#"{
        "technical_skills": ["Python", "Kubernetes", "AWS"],
        "soft_skills": [],
        "certifications": ["CKA"],
        "experience_keywords": [],
        "education_keywords": [],
        "industry_terms": ["SaaS"]
    }"#;

    fn judge() -> Arc<FakeJudge> {
        Arc::new(
            FakeJudge::new()
                .respond("DOCUMENT TYPE: resume", RESUME_KEYWORDS)
                .respond("DOCUMENT TYPE: job_description", JOB_KEYWORDS),
        )
    }

    #[tokio::test]
    async fn test_extract_normalizes_and_dedupes() {
        let extractor = KeywordExtractor::new(judge());
        let keywords = extractor
            .extract("Python, Django, AWS", DocumentKind::Resume)
            .await
            .unwrap();
        assert_eq!(
            keywords.technical_skills,
            vec!["Python", "Django", "AWS", "JavaScript"]
        );
        assert!(keywords.industry_terms.is_empty());
    }

    #[tokio::test]
    async fn test_extract_rejects_blank_input_without_calling_model() {
        let judge = judge();
        let extractor = KeywordExtractor::new(judge.clone());
        let err = extractor
            .extract("   ", DocumentKind::JobDescription)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(judge.calls(), 0);
    }

    #[tokio::test]
    async fn test_extract_from_both_returns_each_side() {
        let extractor = KeywordExtractor::new(judge());
        let (resume, job) = extract_from_both(&extractor, "Python dev", "Need Kubernetes")
            .await
            .unwrap();
        assert!(resume.technical_skills.contains(&"Django".to_string()));
        assert_eq!(job.certifications, vec!["Certified Kubernetes Administrator"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_extract_from_both_runs_sides_concurrently() {
        let delay = Duration::from_secs(1);
        let judge = Arc::new(
            FakeJudge::new()
                .respond("DOCUMENT TYPE: resume", RESUME_KEYWORDS)
                .respond("DOCUMENT TYPE: job_description", JOB_KEYWORDS)
                .with_delay(delay),
        );
        let extractor = KeywordExtractor::new(judge.clone());

        let started = Instant::now();
        extract_from_both(&extractor, "Python dev", "Need Kubernetes")
            .await
            .unwrap();
        let elapsed = started.elapsed();

        assert!(elapsed >= delay && elapsed < delay * 2, "took {elapsed:?}");
        assert_eq!(judge.calls_for("DOCUMENT TYPE: resume"), 1);
        assert_eq!(judge.calls_for("DOCUMENT TYPE: job_description"), 1);
    }

    #[tokio::test]
    async fn test_extract_from_both_fails_when_either_side_fails() {
        let judge = Arc::new(
            FakeJudge::new()
                .respond("DOCUMENT TYPE: resume", RESUME_KEYWORDS)
                .respond("DOCUMENT TYPE: job_description", "I cannot help with that."),
        );
        let extractor = KeywordExtractor::new(judge);
        let err = extract_from_both(&extractor, "Python dev", "Need Kubernetes")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Schema { stage: "keyword extraction", .. }));
    }
}
