//! Resume Editor Agent: applies one free-text user instruction to a resume.
//!
//! Sections the instruction does not target are restored from the input after
//! the model call, so an edit can only land where the user asked for it.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::errors::{require_text, AppError};
use crate::llm_client::prompts::{json_system, NON_FABRICATION_INSTRUCTION, RESUME_SCHEMA};
use crate::llm_client::{evaluate, TextJudge};
use crate::models::ResumeData;
use crate::resume::guard::{fold, Guard};
use crate::resume::prompts::{RESUME_EDIT_SYSTEM, RESUME_EDIT_TEMPLATE};

const CONTACT_TERMS: &[&str] = &[
    "contact", "name", "email", "e-mail", "phone", "mobile", "address", "location", "city",
    "link", "linkedin", "github", "website", "portfolio", "url",
];
const SUMMARY_TERMS: &[&str] = &["summary", "objective", "profile", "about me", "intro"];
const EXPERIENCE_TERMS: &[&str] = &[
    "experience", "work history", "job", "role", "position", "employ", "company", "bullet",
    "responsibilit", "achievement", "intern",
];
const EDUCATION_TERMS: &[&str] = &[
    "education", "degree", "university", "college", "school", "gpa", "graduat", "major",
];
const SKILL_TERMS: &[&str] = &["skill", "technolog", "language", "tool", "framework"];
const CERTIFICATION_TERMS: &[&str] = &["certif", "license", "licence", "credential"];
const PROJECT_TERMS: &[&str] = &["project", "portfolio", "side work"];
const DATE_TERMS: &[&str] = &["date", "year", "month", "tenure", "timeline", "when i"];

/// Which parts of the resume an instruction is allowed to change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditScope {
    pub contact: bool,
    pub summary: bool,
    /// Roles may be added, removed or retitled.
    pub experience: bool,
    /// Role bullets may be reworded in place.
    pub bullets: bool,
    pub education: bool,
    pub skills: bool,
    pub certifications: bool,
    pub projects: bool,
    pub dates: bool,
}

impl EditScope {
    /// Detects targeted sections by keyword family. An instruction that names
    /// no section ("fix typos") may touch any content section, but work history
    /// keeps its roles and only their bullets change. Contact details and dates
    /// are only editable when named.
    pub fn from_instruction(instruction: &str) -> Self {
        let lowered = instruction.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric() && c != '-')
            .filter(|w| !w.is_empty())
            .collect();
        let mentions = |terms: &[&str]| {
            terms.iter().any(|term| {
                if term.contains(' ') {
                    lowered.contains(term)
                } else {
                    words.iter().any(|w| w.starts_with(term))
                }
            })
        };

        let mut scope = EditScope {
            contact: mentions(CONTACT_TERMS),
            summary: mentions(SUMMARY_TERMS),
            experience: mentions(EXPERIENCE_TERMS),
            bullets: false,
            education: mentions(EDUCATION_TERMS),
            skills: mentions(SKILL_TERMS),
            certifications: mentions(CERTIFICATION_TERMS),
            projects: mentions(PROJECT_TERMS),
            dates: mentions(DATE_TERMS),
        };

        // Dates live on roles.
        scope.experience |= scope.dates;
        scope.bullets = scope.experience;

        if !scope.targets_content() && !scope.contact {
            scope.summary = true;
            scope.bullets = true;
            scope.education = true;
            scope.skills = true;
            scope.certifications = true;
            scope.projects = true;
        }
        scope
    }

    fn targets_content(&self) -> bool {
        self.summary
            || self.experience
            || self.education
            || self.skills
            || self.certifications
            || self.projects
    }
}

pub struct ResumeEditorAgent {
    judge: Arc<dyn TextJudge>,
}

impl ResumeEditorAgent {
    pub fn new(judge: Arc<dyn TextJudge>) -> Self {
        Self { judge }
    }

    pub async fn edit(&self, resume: &ResumeData, instruction: &str) -> Result<ResumeData, AppError> {
        require_text("instruction", instruction)?;
        if resume.is_blank() {
            return Err(AppError::Validation("resume cannot be empty".to_string()));
        }

        let scope = EditScope::from_instruction(instruction);
        info!("Edit scope: {scope:?}");

        let resume_json =
            serde_json::to_string_pretty(resume).context("Failed to serialize resume data")?;
        let prompt = RESUME_EDIT_TEMPLATE
            .replace("{schema}", RESUME_SCHEMA)
            .replace("{resume_json}", &resume_json)
            .replace("{instruction}", instruction);
        let system = format!(
            "{} {NON_FABRICATION_INSTRUCTION}",
            json_system(RESUME_EDIT_SYSTEM)
        );

        let guard = Guard::new(resume).with_instruction(instruction);
        let edited: ResumeData = evaluate(
            self.judge.as_ref(),
            "resume edit",
            &prompt,
            &system,
            |output: &mut ResumeData| enforce(&guard, scope, output),
        )
        .await?;

        Ok(edited)
    }
}

/// Normalizes an edited resume, restores every section outside `scope`, then
/// checks what is left.
fn enforce(guard: &Guard<'_>, scope: EditScope, output: &mut ResumeData) -> Result<(), String> {
    let source = guard.source();
    output.split_bullets();
    output.drop_placeholders();

    if !scope.contact {
        guard.restore_contact(output);
    }
    if !scope.summary {
        output.summary = source.summary.clone();
    }
    if !scope.education {
        guard.restore_education(output);
    }
    if !scope.skills {
        output.skills = source.skills.clone();
    }
    if !scope.certifications {
        guard.restore_certifications(output);
    }
    if !scope.projects {
        output.projects = source.projects.clone();
    }

    if !scope.experience {
        if output.work_experience.len() != source.work_experience.len() {
            return Err(format!(
                "work history has {} roles, expected {}",
                output.work_experience.len(),
                source.work_experience.len()
            ));
        }
        let mut roles = source.work_experience.clone();
        if scope.bullets {
            for (role, job) in roles.iter_mut().zip(&mut output.work_experience) {
                if fold(&job.company) != fold(&role.company) || fold(&job.title) != fold(&role.title) {
                    return Err(format!(
                        "role '{}' at '{}' was replaced by '{}' at '{}'",
                        role.title, role.company, job.title, job.company
                    ));
                }
                role.description = std::mem::take(&mut job.description);
            }
        }
        output.work_experience = roles;
    } else if !scope.dates {
        for (position, job) in output.work_experience.iter_mut().enumerate() {
            if let Some(role) = guard.matching_role_loose(job, position) {
                Guard::restore_role_facts(job, role);
            }
        }
    }

    guard.check_non_fabrication(output)?;
    if output.is_blank() {
        return Err("edit produced an empty resume".to_string());
    }
    Ok(())
}
