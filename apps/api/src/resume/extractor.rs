//! Resume Data Extractor: raw resume text → `ResumeData`.

use std::sync::Arc;

use tracing::info;

use crate::errors::{require_text, AppError};
use crate::llm_client::prompts::{json_system, RESUME_SCHEMA};
use crate::llm_client::{evaluate, TextJudge};
use crate::models::ResumeData;
use crate::resume::prompts::{RESUME_EXTRACTION_SYSTEM, RESUME_EXTRACTION_TEMPLATE};

pub struct ResumeDataExtractor {
    judge: Arc<dyn TextJudge>,
}

impl ResumeDataExtractor {
    pub fn new(judge: Arc<dyn TextJudge>) -> Self {
        Self { judge }
    }

    /// Dates are kept verbatim; bullets are split one per element and
    /// placeholder values dropped before the result is returned.
    pub async fn extract(&self, text: &str) -> Result<ResumeData, AppError> {
        require_text("resume", text)?;

        let prompt = RESUME_EXTRACTION_TEMPLATE
            .replace("{schema}", RESUME_SCHEMA)
            .replace("{resume_text}", text);

        let resume: ResumeData = evaluate(
            self.judge.as_ref(),
            "resume extraction",
            &prompt,
            &json_system(RESUME_EXTRACTION_SYSTEM),
            |resume: &mut ResumeData| {
                resume.split_bullets();
                resume.drop_placeholders();
                if resume.is_blank() {
                    return Err("no name and no resume sections were extracted".to_string());
                }
                Ok(())
            },
        )
        .await?;

        info!(
            "Extracted resume for '{}': {} roles, {} schools, {} skill groups, {} projects",
            resume.name,
            resume.work_experience.len(),
            resume.education.len(),
            resume.skills.len(),
            resume.projects.len()
        );
        Ok(resume)
    }
}
