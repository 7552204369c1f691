//! Non-fabrication guard for the rewriting agents.
//!
//! Checks a rewritten `ResumeData` against the value it was derived from and
//! restores fields an agent is not allowed to touch. Check failures are
//! returned as messages so `evaluate` retries them as contract violations;
//! restorations are applied in place and logged.

use std::cmp::Reverse;
use std::collections::HashSet;

use tracing::warn;

use crate::models::{ResumeData, WorkExperience};

/// Case-insensitive, whitespace-folded comparison key.
pub(crate) fn fold(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Lowercased word tokens. `+` and `#` stay part of a token, so "C++" and
/// "C#" never stand in for a bare "C".
fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// `needle` appears in `haystack` as a run of whole tokens.
fn contains_phrase(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty()
        && needle.len() <= haystack.len()
        && haystack.windows(needle.len()).any(|window| window == needle)
}

pub struct Guard<'a> {
    source: &'a ResumeData,
    companies: HashSet<String>,
    titles: HashSet<String>,
    degrees: HashSet<String>,
    certifications: HashSet<String>,
    projects: HashSet<String>,
    /// Tokens of every piece of source text, one entry per fragment.
    corpus: Vec<Vec<String>>,
    /// Tokens of the user instruction; terms found here are not fabrications.
    instruction: Vec<String>,
}

impl<'a> Guard<'a> {
    pub fn new(source: &'a ResumeData) -> Self {
        let keys = |values: Vec<&str>| values.into_iter().map(fold).collect::<HashSet<_>>();

        Self {
            source,
            companies: keys(source.work_experience.iter().map(|j| j.company.as_str()).collect()),
            titles: keys(source.work_experience.iter().map(|j| j.title.as_str()).collect()),
            degrees: keys(source.education.iter().map(|e| e.degree.as_str()).collect()),
            certifications: keys(source.certifications.iter().map(|c| c.name.as_str()).collect()),
            projects: keys(source.projects.iter().map(|p| p.name.as_str()).collect()),
            corpus: text_fragments(source).into_iter().map(tokens).collect(),
            instruction: Vec::new(),
        }
    }

    /// Lets the editor introduce terms the user wrote in the instruction.
    pub fn with_instruction(mut self, instruction: &str) -> Self {
        self.instruction = tokens(instruction);
        self
    }

    pub fn source(&self) -> &ResumeData {
        self.source
    }

    fn from_instruction(&self, value: &str) -> bool {
        contains_phrase(&self.instruction, &tokens(value))
    }

    fn known(&self, set: &HashSet<String>, value: &str) -> bool {
        let key = fold(value);
        key.is_empty() || set.contains(&key) || self.from_instruction(value)
    }

    /// A skill or technology is known when its tokens appear, in order and on
    /// word boundaries, somewhere in the source text or the instruction.
    fn known_term(&self, value: &str) -> bool {
        let needle = tokens(value);
        needle.is_empty()
            || self.corpus.iter().any(|fragment| contains_phrase(fragment, &needle))
            || contains_phrase(&self.instruction, &needle)
    }

    /// Every company, title, degree, certification, project, skill and
    /// project technology in `output` must already exist in the source.
    pub fn check_non_fabrication(&self, output: &ResumeData) -> Result<(), String> {
        for job in &output.work_experience {
            if !self.known(&self.companies, &job.company) {
                return Err(format!("company '{}' is not in the source resume", job.company));
            }
            if !self.known(&self.titles, &job.title) {
                return Err(format!("title '{}' is not in the source resume", job.title));
            }
        }
        for school in &output.education {
            if !self.known(&self.degrees, &school.degree) {
                return Err(format!("degree '{}' is not in the source resume", school.degree));
            }
        }
        for cert in &output.certifications {
            if !self.known(&self.certifications, &cert.name) {
                return Err(format!("certification '{}' is not in the source resume", cert.name));
            }
        }
        for project in &output.projects {
            if !self.known(&self.projects, &project.name) {
                return Err(format!("project '{}' is not in the source resume", project.name));
            }
            if let Some(tech) = project.technologies.iter().find(|t| !self.known_term(t)) {
                return Err(format!(
                    "technology '{tech}' on project '{}' is not in the source resume",
                    project.name
                ));
            }
        }
        for item in output.skills.iter().flat_map(|g| g.items.iter()) {
            if !self.known_term(item) {
                return Err(format!("skill '{item}' is not in the source resume"));
            }
        }
        Ok(())
    }

    /// Name, email, phone, location and links.
    pub fn restore_contact(&self, output: &mut ResumeData) {
        let source = self.source;
        if output.name != source.name
            || output.email != source.email
            || output.phone != source.phone
            || output.location != source.location
            || output.links != source.links
        {
            warn!("Restoring contact details changed by the model");
        }
        output.name = source.name.clone();
        output.email = source.email.clone();
        output.phone = source.phone.clone();
        output.location = source.location.clone();
        output.links = source.links.clone();
    }

    pub fn restore_education(&self, output: &mut ResumeData) {
        if output.education != self.source.education {
            warn!("Restoring education entries changed by the model");
            output.education = self.source.education.clone();
        }
    }

    pub fn restore_certifications(&self, output: &mut ResumeData) {
        if output.certifications != self.source.certifications {
            warn!("Restoring certifications changed by the model");
            output.certifications = self.source.certifications.clone();
        }
    }

    /// Source role with the same company and title. `position` is the index
    /// of `job` in the rewritten work history.
    pub fn matching_role(&self, job: &WorkExperience, position: usize) -> Option<&'a WorkExperience> {
        let (company, title) = (fold(&job.company), fold(&job.title));
        self.closest_role(job, position, |s| {
            fold(&s.company) == company && fold(&s.title) == title
        })
    }

    /// Like `matching_role`, but falls back to a role at the same company
    /// when the title was edited.
    pub fn matching_role_loose(
        &self,
        job: &WorkExperience,
        position: usize,
    ) -> Option<&'a WorkExperience> {
        self.matching_role(job, position).or_else(|| {
            let company = fold(&job.company);
            self.closest_role(job, position, |s| fold(&s.company) == company)
        })
    }

    /// Among the source roles accepted by `candidate`, the one sharing the
    /// most bullets with `job`; ties go to the nearest source position.
    fn closest_role(
        &self,
        job: &WorkExperience,
        position: usize,
        candidate: impl Fn(&WorkExperience) -> bool,
    ) -> Option<&'a WorkExperience> {
        let bullets: HashSet<String> = job.description.iter().map(|b| fold(b)).collect();
        let source: &'a ResumeData = self.source;
        source
            .work_experience
            .iter()
            .enumerate()
            .filter(|(_, role)| candidate(*role))
            .max_by_key(|(index, role)| {
                let shared = role
                    .description
                    .iter()
                    .filter(|b| bullets.contains(&fold(b)))
                    .count();
                (shared, Reverse(index.abs_diff(position)))
            })
            .map(|(_, role)| role)
    }

    /// Copies dates and location from `role` onto `job`.
    pub fn restore_role_facts(job: &mut WorkExperience, role: &WorkExperience) {
        if job.tenure != role.tenure || job.location != role.location {
            warn!(
                "Restoring dates/location for {} at {}",
                role.title, role.company
            );
        }
        job.tenure = role.tenure.clone();
        job.location = role.location.clone();
    }

    /// Every source role must still be present.
    pub fn check_roles_present(&self, output: &ResumeData) -> Result<(), String> {
        for role in &self.source.work_experience {
            let present = output.work_experience.iter().any(|job| {
                fold(&job.company) == fold(&role.company) && fold(&job.title) == fold(&role.title)
            });
            if !present {
                return Err(format!(
                    "role '{}' at '{}' was removed",
                    role.title, role.company
                ));
            }
        }
        Ok(())
    }
}

/// All free text held by a resume, in document order.
fn text_fragments(resume: &ResumeData) -> Vec<&str> {
    let mut fragments: Vec<&str> = vec![resume.name.as_str()];
    fragments.extend(resume.summary.as_deref());

    for job in &resume.work_experience {
        fragments.push(&job.company);
        fragments.push(&job.title);
        fragments.extend(job.description.iter().map(String::as_str));
    }
    for school in &resume.education {
        fragments.push(&school.institution);
        fragments.push(&school.degree);
        fragments.extend(school.field_of_study.as_deref());
        fragments.extend(school.details.iter().map(String::as_str));
    }
    for group in &resume.skills {
        fragments.push(&group.category);
        fragments.extend(group.items.iter().map(String::as_str));
    }
    for cert in &resume.certifications {
        fragments.push(&cert.name);
        fragments.extend(cert.issuer.as_deref());
    }
    for project in &resume.projects {
        fragments.push(&project.name);
        fragments.extend(project.description.iter().map(String::as_str));
        fragments.extend(project.technologies.iter().map(String::as_str));
    }
    fragments
}
