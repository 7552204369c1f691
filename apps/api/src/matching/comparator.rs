//! Keyword Comparator: scores a resume's keywords against a job's and
//! partitions every job keyword into matching or missing.
//!
//! Scoring follows a prompt-level rubric and is not reproducible bit-for-bit.
//! The partition is a hard contract: it is checked after every call and a
//! violating reply is retried like a malformed one.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::json_system;
use crate::llm_client::{evaluate, TextJudge};
use crate::matching::normalize::{keyword_key, normalize_keywords};
use crate::matching::prompts::{KEYWORD_COMPARISON_SYSTEM, KEYWORD_COMPARISON_TEMPLATE};
use crate::models::{check_score, ExtractedKeywords, KeywordCategory, KeywordComparison};

pub struct KeywordComparator {
    judge: Arc<dyn TextJudge>,
}

impl KeywordComparator {
    pub fn new(judge: Arc<dyn TextJudge>) -> Self {
        Self { judge }
    }

    pub async fn compare(
        &self,
        resume: &ExtractedKeywords,
        job: &ExtractedKeywords,
    ) -> Result<KeywordComparison, AppError> {
        let prompt = KEYWORD_COMPARISON_TEMPLATE
            .replace(
                "{resume_keywords}",
                &serde_json::to_string_pretty(resume).context("Failed to serialize resume keywords")?,
            )
            .replace(
                "{job_keywords}",
                &serde_json::to_string_pretty(job).context("Failed to serialize job keywords")?,
            );

        let comparison: KeywordComparison = evaluate(
            self.judge.as_ref(),
            "keyword comparison",
            &prompt,
            &json_system(KEYWORD_COMPARISON_SYSTEM),
            |comparison: &mut KeywordComparison| {
                normalize_keywords(&mut comparison.matching_keywords);
                normalize_keywords(&mut comparison.missing_keywords);
                check_score("keyword_match_score", comparison.keyword_match_score)?;
                check_partition(comparison, job)
            },
        )
        .await?;

        info!(
            "Keyword match score: {} ({} matching, {} missing)",
            comparison.keyword_match_score,
            comparison.matching_keywords.len(),
            comparison.missing_keywords.len()
        );
        Ok(comparison)
    }
}

/// Every job keyword must sit in exactly one of matching/missing within its
/// own category, and nothing else may appear in either.
pub fn check_partition(comparison: &KeywordComparison, job: &ExtractedKeywords) -> Result<(), String> {
    for category in KeywordCategory::ALL {
        let field = category.field_name();
        let expected: HashSet<String> = job.get(category).iter().map(|k| keyword_key(k)).collect();
        let matching: HashSet<String> = comparison
            .matching_keywords
            .get(category)
            .iter()
            .map(|k| keyword_key(k))
            .collect();
        let missing: HashSet<String> = comparison
            .missing_keywords
            .get(category)
            .iter()
            .map(|k| keyword_key(k))
            .collect();

        if let Some(both) = matching.intersection(&missing).next() {
            return Err(format!("'{both}' is both matching and missing in {field}"));
        }
        if let Some(unknown) = matching.union(&missing).find(|k| !expected.contains(*k)) {
            return Err(format!(
                "'{unknown}' in {field} is not a job description keyword of that category"
            ));
        }
        if let Some(dropped) = expected
            .iter()
            .find(|k| !matching.contains(*k) && !missing.contains(*k))
        {
            return Err(format!("job keyword '{dropped}' in {field} was not classified"));
        }
    }
    Ok(())
}
