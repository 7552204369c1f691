//! Canonical candidate profile. Produced by resume extraction, rewritten by the
//! tailor/editor agents, consumed by the document generator.

use serde::{Deserialize, Serialize};

use crate::models::null_as_empty;

/// Optional values models commonly emit instead of omitting a field.
const PLACEHOLDERS: &[&str] = &["", "n/a", "na", "none", "null", "unknown", "-", "tbd"];

/// Leading glyphs that mark a line as a bullet.
const BULLET_GLYPHS: &[char] = &['•', '▪', '◦', '·', '‣'];

/// Also bullet markers, but only when whitespace follows: "-40% latency" is
/// a negative number, not a list item.
const DASH_GLYPHS: &[char] = &['-', '–', '*'];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills: Vec<SkillGroup>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub certifications: Vec<Certification>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub links: Vec<Link>,
}

/// A start/end pair kept exactly as written in the source ("Jan 2020", "2019").
/// An absent end means the range is ongoing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl DateRange {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }
}

/// Employment period(s) at one company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tenure {
    Single(DateRange),
    /// Non-contiguous stints, in source order.
    Multiple(Vec<DateRange>),
}

impl Default for Tenure {
    fn default() -> Self {
        Tenure::Single(DateRange::default())
    }
}

impl Tenure {
    pub fn ranges(&self) -> &[DateRange] {
        match self {
            Tenure::Single(range) => std::slice::from_ref(range),
            Tenure::Multiple(ranges) => ranges,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "WorkExperienceRecord", into = "WorkExperienceRecord")]
pub struct WorkExperience {
    pub company: String,
    pub title: String,
    pub location: Option<String>,
    pub tenure: Tenure,
    /// One bullet per element.
    pub description: Vec<String>,
}

/// Flat wire shape of `WorkExperience`. A non-empty `date_ranges` takes
/// precedence over `start_date`/`end_date`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WorkExperienceRecord {
    #[serde(default)]
    company: String,
    #[serde(default)]
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    date_ranges: Vec<DateRange>,
    #[serde(default, deserialize_with = "null_as_empty")]
    description: Vec<String>,
}

impl From<WorkExperienceRecord> for WorkExperience {
    fn from(record: WorkExperienceRecord) -> Self {
        let mut ranges: Vec<DateRange> = record
            .date_ranges
            .into_iter()
            .filter(|r| !r.is_empty())
            .collect();

        let tenure = match ranges.len() {
            0 => Tenure::Single(DateRange {
                start_date: record.start_date,
                end_date: record.end_date,
            }),
            1 => Tenure::Single(ranges.remove(0)),
            _ => Tenure::Multiple(ranges),
        };

        WorkExperience {
            company: record.company,
            title: record.title,
            location: record.location,
            tenure,
            description: record.description,
        }
    }
}

impl From<WorkExperience> for WorkExperienceRecord {
    fn from(experience: WorkExperience) -> Self {
        let (start_date, end_date, date_ranges) = match experience.tenure {
            Tenure::Single(range) => (range.start_date, range.end_date, Vec::new()),
            Tenure::Multiple(ranges) => (None, None, ranges),
        };

        WorkExperienceRecord {
            company: experience.company,
            title: experience.title,
            location: experience.location,
            start_date,
            end_date,
            date_ranges,
            description: experience.description,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub details: Vec<String>,
}

/// Skills grouped the way the source document grouped them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: String,
}

impl ResumeData {
    /// True when nothing beyond an empty shell was extracted.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
            && self.work_experience.is_empty()
            && self.education.is_empty()
            && self.skills.is_empty()
            && self.projects.is_empty()
    }

    /// Enforces one semantic unit per bullet element across every bullet list.
    pub fn split_bullets(&mut self) {
        for job in &mut self.work_experience {
            job.description = split_bullet_list(std::mem::take(&mut job.description));
        }
        for project in &mut self.projects {
            project.description = split_bullet_list(std::mem::take(&mut project.description));
        }
        for school in &mut self.education {
            school.details = split_bullet_list(std::mem::take(&mut school.details));
        }
    }

    /// Replaces placeholder optional values with absent fields and drops
    /// entries that carry nothing.
    pub fn drop_placeholders(&mut self) {
        scrub(&mut self.email);
        scrub(&mut self.phone);
        scrub(&mut self.location);
        scrub(&mut self.summary);

        for job in &mut self.work_experience {
            scrub(&mut job.location);
            let ranges = match &mut job.tenure {
                Tenure::Single(range) => std::slice::from_mut(range),
                Tenure::Multiple(ranges) => ranges.as_mut_slice(),
            };
            for range in ranges {
                scrub(&mut range.start_date);
                scrub(&mut range.end_date);
            }
        }
        for school in &mut self.education {
            for field in [
                &mut school.field_of_study,
                &mut school.location,
                &mut school.start_date,
                &mut school.end_date,
                &mut school.gpa,
            ] {
                scrub(field);
            }
        }
        for cert in &mut self.certifications {
            scrub(&mut cert.issuer);
            scrub(&mut cert.date);
        }
        for project in &mut self.projects {
            scrub(&mut project.link);
            project.technologies.retain(|t| !is_placeholder(t));
        }
        for group in &mut self.skills {
            group.items.retain(|item| !is_placeholder(item));
        }

        self.skills.retain(|g| !g.items.is_empty());
        self.certifications.retain(|c| !is_placeholder(&c.name));
        self.links.retain(|l| !is_placeholder(&l.url));
    }
}

fn is_placeholder(value: &str) -> bool {
    PLACEHOLDERS.contains(&value.trim().to_lowercase().as_str())
}

fn scrub(field: &mut Option<String>) {
    if field.as_deref().map(is_placeholder).unwrap_or(false) {
        *field = None;
    }
}

fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(glyph), None) if BULLET_GLYPHS.contains(&glyph) || DASH_GLYPHS.contains(&glyph) => "",
        (Some(glyph), Some(_)) if BULLET_GLYPHS.contains(&glyph) => line[glyph.len_utf8()..].trim(),
        (Some(glyph), Some(next)) if DASH_GLYPHS.contains(&glyph) && next.is_whitespace() => {
            line[glyph.len_utf8()..].trim()
        }
        _ => line,
    }
}

fn split_bullet_list(items: Vec<String>) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.lines())
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
