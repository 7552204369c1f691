//! Resume Tailor Agent: rewrites emphasis, wording and order of a resume to
//! target one job description.
//!
//! Contact details, links, education and certifications are pinned to the
//! source. Every role keeps its dates and location. Nothing new may appear.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::errors::{require_text, AppError};
use crate::llm_client::prompts::{json_system, NON_FABRICATION_INSTRUCTION, RESUME_SCHEMA};
use crate::llm_client::{evaluate, TextJudge};
use crate::models::ResumeData;
use crate::resume::guard::Guard;
use crate::resume::prompts::{RESUME_TAILOR_SYSTEM, RESUME_TAILOR_TEMPLATE};

/// Tailoring may trim projects, but never below this many.
pub const MIN_PROJECTS: usize = 2;

pub struct ResumeTailorAgent {
    judge: Arc<dyn TextJudge>,
}

impl ResumeTailorAgent {
    pub fn new(judge: Arc<dyn TextJudge>) -> Self {
        Self { judge }
    }

    pub async fn tailor(
        &self,
        resume: &ResumeData,
        job_description: &str,
    ) -> Result<ResumeData, AppError> {
        require_text("job_description", job_description)?;
        if resume.is_blank() {
            return Err(AppError::Validation("resume cannot be empty".to_string()));
        }

        let resume_json =
            serde_json::to_string_pretty(resume).context("Failed to serialize resume data")?;
        let prompt = RESUME_TAILOR_TEMPLATE
            .replace("{schema}", RESUME_SCHEMA)
            .replace("{resume_json}", &resume_json)
            .replace("{job_description}", job_description);
        let system = format!(
            "{} {NON_FABRICATION_INSTRUCTION}",
            json_system(RESUME_TAILOR_SYSTEM)
        );

        let guard = Guard::new(resume);
        let tailored: ResumeData = evaluate(
            self.judge.as_ref(),
            "resume tailoring",
            &prompt,
            &system,
            |output: &mut ResumeData| enforce(&guard, output),
        )
        .await?;

        info!(
            "Tailored resume for '{}': {} roles, {} projects kept of {}",
            tailored.name,
            tailored.work_experience.len(),
            tailored.projects.len(),
            resume.projects.len()
        );
        Ok(tailored)
    }
}

/// Normalizes a tailored resume, restores pinned fields, then checks what the
/// model was allowed to change.
fn enforce(guard: &Guard<'_>, output: &mut ResumeData) -> Result<(), String> {
    output.split_bullets();
    output.drop_placeholders();

    guard.restore_contact(output);
    guard.restore_education(output);
    guard.restore_certifications(output);

    for (position, job) in output.work_experience.iter_mut().enumerate() {
        let role = guard.matching_role(job, position).ok_or_else(|| {
            format!(
                "role '{}' at '{}' does not match any source role",
                job.title, job.company
            )
        })?;
        Guard::restore_role_facts(job, role);
    }
    guard.check_roles_present(output)?;
    guard.check_non_fabrication(output)?;

    let required = MIN_PROJECTS.min(guard.source().projects.len());
    if output.projects.len() < required {
        return Err(format!(
            "kept {} projects, at least {required} required",
            output.projects.len()
        ));
    }

    if output.summary.as_deref().map(str::trim).unwrap_or("").is_empty() {
        return Err("summary missing".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::FakeJudge;
    use crate::models::{
        Certification, DateRange, Education, Link, Project, SkillGroup, Tenure, WorkExperience,
    };

    fn project(name: &str) -> Project {
        Project {
            name: name.to_string(),
            description: vec![format!("{name} description")],
            ..Default::default()
        }
    }

    fn source() -> ResumeData {
        ResumeData {
            name: "Jane Doe".to_string(),
            email: Some("jane@example.com".to_string()),
            phone: Some("+49 30 1234".to_string()),
            location: Some("Berlin".to_string()),
            summary: Some("Backend engineer.".to_string()),
            work_experience: vec![
                WorkExperience {
                    company: "Acme Corp".to_string(),
                    title: "Backend Engineer".to_string(),
                    location: Some("Berlin".to_string()),
                    tenure: Tenure::Single(DateRange {
                        start_date: Some("Jan 2020".to_string()),
                        end_date: None,
                    }),
                    description: vec![
                        "Maintained internal tools".to_string(),
                        "Migrated services to AWS".to_string(),
                    ],
                },
                WorkExperience {
                    company: "Initech".to_string(),
                    title: "Intern".to_string(),
                    location: None,
                    tenure: Tenure::Single(DateRange {
                        start_date: Some("Summer 2018".to_string()),
                        end_date: Some("Fall 2018".to_string()),
                    }),
                    description: vec!["Wrote Python scripts".to_string()],
                },
            ],
            education: vec![Education {
                institution: "TU Berlin".to_string(),
                degree: "B.Sc. Computer Science".to_string(),
                ..Default::default()
            }],
            skills: vec![SkillGroup {
                category: "Languages".to_string(),
                items: vec!["Go".to_string(), "Python".to_string()],
            }],
            certifications: vec![Certification {
                name: "AWS Certified Developer".to_string(),
                issuer: Some("Amazon".to_string()),
                date: Some("2021".to_string()),
            }],
            projects: vec![project("ledger"), project("dotfiles"), project("blog")],
            links: vec![Link {
                label: "GitHub".to_string(),
                url: "https://github.com/jane".to_string(),
            }],
        }
    }

    /// What a well-behaved model returns: reordered, reworded, same facts.
    fn tailored() -> ResumeData {
        let mut output = source();
        output.summary = Some("Backend engineer with AWS migration experience.".to_string());
        output.work_experience[0].description = vec![
            "Led migration of services to AWS".to_string(),
            "Maintained internal tools".to_string(),
        ];
        output.skills[0].items = vec!["Python".to_string(), "Go".to_string()];
        output.projects = vec![project("ledger"), project("blog")];
        output
    }

    fn reply(resume: &ResumeData) -> String {
        serde_json::to_string(resume).unwrap()
    }

    #[tokio::test]
    async fn test_tailor_accepts_reordered_resume() {
        let judge = Arc::new(FakeJudge::new().respond("RESUME TAILORING", reply(&tailored())));
        let output = ResumeTailorAgent::new(judge)
            .tailor(&source(), "Cloud engineer, AWS, Python")
            .await
            .unwrap();
        assert_eq!(output.skills[0].items, vec!["Python", "Go"]);
        assert_eq!(output.projects.len(), 2);
        assert_eq!(
            output.work_experience[0].description[0],
            "Led migration of services to AWS"
        );
    }

    #[tokio::test]
    async fn test_tailor_restores_pinned_fields() {
        let mut drifted = tailored();
        drifted.email = Some("jane.doe@example.com".to_string());
        drifted.links.clear();
        drifted.education[0].institution = "Technische Universität Berlin".to_string();
        drifted.certifications[0].date = None;
        drifted.work_experience[1].tenure = Tenure::Single(DateRange {
            start_date: Some("2018-06".to_string()),
            end_date: Some("2018-09".to_string()),
        });

        let judge = Arc::new(FakeJudge::new().respond("RESUME TAILORING", reply(&drifted)));
        let output = ResumeTailorAgent::new(judge.clone())
            .tailor(&source(), "Cloud engineer")
            .await
            .unwrap();

        let source = source();
        assert_eq!(output.email, source.email);
        assert_eq!(output.links, source.links);
        assert_eq!(output.education, source.education);
        assert_eq!(output.certifications, source.certifications);
        assert_eq!(output.work_experience[1].tenure, source.work_experience[1].tenure);
        assert_eq!(judge.calls(), 1);
    }

    #[tokio::test]
    async fn test_tailor_restores_reworded_certification_without_retry() {
        let mut reworded = tailored();
        reworded.certifications[0].name = "AWS Developer Associate".to_string();
        let judge = Arc::new(FakeJudge::new().respond("RESUME TAILORING", reply(&reworded)));
        let output = ResumeTailorAgent::new(judge.clone())
            .tailor(&source(), "Cloud engineer")
            .await
            .unwrap();
        assert_eq!(output.certifications, source().certifications);
        assert_eq!(judge.calls(), 1);
    }

    #[tokio::test]
    async fn test_tailor_retries_invented_project_technology() {
        let mut invented = tailored();
        invented.projects[0].technologies = vec!["Kubernetes".to_string(), "Terraform".to_string()];
        let judge = Arc::new(FakeJudge::new().respond_sequence(
            "RESUME TAILORING",
            vec![reply(&invented), reply(&tailored())],
        ));
        let output = ResumeTailorAgent::new(judge.clone())
            .tailor(&source(), "Platform engineer, Kubernetes, Terraform")
            .await
            .unwrap();
        assert!(output.projects[0].technologies.is_empty());
        assert_eq!(judge.calls(), 2);
    }

    #[tokio::test]
    async fn test_tailor_rejects_skill_hidden_inside_source_words() {
        // "Go" only appears inside "Google", "Java" only inside "JavaScript".
        let mut source = source();
        source.work_experience[1].company = "Google".to_string();
        source.skills[0].items = vec!["JavaScript".to_string(), "Python".to_string()];
        let mut output = source.clone();
        output.skills[0].items.extend(["Go".to_string(), "Java".to_string()]);
        output.projects.truncate(2);

        let judge = Arc::new(FakeJudge::new().respond("RESUME TAILORING", reply(&output)));
        let err = ResumeTailorAgent::new(judge.clone())
            .tailor(&source, "Go and Java backend engineer")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Invariant { .. }));
        assert_eq!(judge.calls(), 3);
    }

    #[tokio::test]
    async fn test_tailor_retries_fabricated_skill() {
        let mut fabricated = tailored();
        fabricated.skills[0].items.push("Kubernetes".to_string());
        let judge = Arc::new(FakeJudge::new().respond_sequence(
            "RESUME TAILORING",
            vec![reply(&fabricated), reply(&tailored())],
        ));
        let output = ResumeTailorAgent::new(judge.clone())
            .tailor(&source(), "Kubernetes platform engineer")
            .await
            .unwrap();
        assert!(!output.skills[0].items.contains(&"Kubernetes".to_string()));
        assert_eq!(judge.calls(), 2);
    }

    #[tokio::test]
    async fn test_tailor_fails_when_role_dropped() {
        let mut dropped = tailored();
        dropped.work_experience.truncate(1);
        let judge = Arc::new(FakeJudge::new().respond("RESUME TAILORING", reply(&dropped)));
        let err = ResumeTailorAgent::new(judge)
            .tailor(&source(), "Cloud engineer")
            .await
            .unwrap_err();
        match err {
            AppError::Invariant { stage, message, .. } => {
                assert_eq!(stage, "resume tailoring");
                assert!(message.contains("Intern"));
            }
            other => panic!("expected invariant error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_tailor_keeps_at_least_two_projects() {
        let mut trimmed = tailored();
        trimmed.projects.truncate(1);
        let judge = Arc::new(FakeJudge::new().respond("RESUME TAILORING", reply(&trimmed)));
        let err = ResumeTailorAgent::new(judge)
            .tailor(&source(), "Cloud engineer")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Invariant { .. }));
    }

    #[tokio::test]
    async fn test_tailor_allows_single_project_source() {
        let mut source = source();
        source.projects.truncate(1);
        let mut output = tailored();
        output.projects.truncate(1);
        let judge = Arc::new(FakeJudge::new().respond("RESUME TAILORING", reply(&output)));
        let result = ResumeTailorAgent::new(judge).tailor(&source, "Cloud engineer").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_tailor_surfaces_unparseable_output() {
        let judge = Arc::new(FakeJudge::new().respond("RESUME TAILORING", "Here is your resume!"));
        let err = ResumeTailorAgent::new(judge)
            .tailor(&source(), "Cloud engineer")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Schema { .. }));
    }

    #[tokio::test]
    async fn test_tailor_rejects_blank_job_description() {
        let judge = Arc::new(FakeJudge::new());
        let err = ResumeTailorAgent::new(judge.clone())
            .tailor(&source(), "  ")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(judge.calls(), 0);
    }
}
