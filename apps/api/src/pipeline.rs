//! The pipeline's whole public surface: scoring, resume extraction, tailoring,
//! editing and document generation. HTTP framing and persistence belong to
//! the caller.

use std::sync::Arc;

use crate::errors::AppError;
use crate::llm_client::TextJudge;
use crate::matching::{KeywordExtractor, KeywordSource, ResumeAnalyzer};
use crate::models::{ResumeAnalysisResult, ResumeData};
use crate::render::build_document;
use crate::resume::{ResumeDataExtractor, ResumeEditorAgent, ResumeTailorAgent};

pub struct Pipeline {
    analyzer: ResumeAnalyzer,
    extractor: ResumeDataExtractor,
    tailor: ResumeTailorAgent,
    editor: ResumeEditorAgent,
}

impl Pipeline {
    /// Every stage uses the model-backed keyword extractor.
    pub fn new(judge: Arc<dyn TextJudge>) -> Self {
        let keywords = Arc::new(KeywordExtractor::new(judge.clone()));
        Self::with_keyword_source(judge, keywords)
    }

    /// Uses `keywords` for the extraction stage of `analyze_resume`, e.g. a
    /// `with_fallback` composition.
    pub fn with_keyword_source(judge: Arc<dyn TextJudge>, keywords: Arc<dyn KeywordSource>) -> Self {
        Self {
            analyzer: ResumeAnalyzer::new(keywords, judge.clone()),
            extractor: ResumeDataExtractor::new(judge.clone()),
            tailor: ResumeTailorAgent::new(judge.clone()),
            editor: ResumeEditorAgent::new(judge),
        }
    }

    pub async fn analyze_resume(
        &self,
        resume: &str,
        job_description: &str,
    ) -> Result<ResumeAnalysisResult, AppError> {
        self.analyzer.analyze(resume, job_description).await
    }

    pub async fn extract_resume_data(&self, text: &str) -> Result<ResumeData, AppError> {
        self.extractor.extract(text).await
    }

    pub async fn tailor_resume(
        &self,
        profile: &ResumeData,
        job_description: &str,
    ) -> Result<ResumeData, AppError> {
        self.tailor.tailor(profile, job_description).await
    }

    pub async fn edit_resume(
        &self,
        current: &ResumeData,
        instruction: &str,
    ) -> Result<ResumeData, AppError> {
        self.editor.edit(current, instruction).await
    }

    pub fn build_document(&self, data: &ResumeData) -> String {
        build_document(data)
    }
}
