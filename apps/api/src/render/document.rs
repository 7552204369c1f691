//! Document Generator: `ResumeData` → LaTeX source.
//!
//! Pure and deterministic: the same input always renders byte-identical
//! output. Every user-authored string passes through `escape_latex` (or
//! `escape_url` for link targets) exactly once, at the point it is embedded.

use crate::models::{DateRange, Education, Project, ResumeData, WorkExperience};
use crate::render::latex::{escape_latex, escape_url};

const PREAMBLE: &str = r"\documentclass[letterpaper,11pt]{article}

\usepackage[empty]{fullpage}
\usepackage[T1]{fontenc}
\usepackage[utf8]{inputenc}
\usepackage{titlesec}
\usepackage{enumitem}
\usepackage[hidelinks]{hyperref}

\pagestyle{empty}
\raggedright
\addtolength{\topmargin}{-0.5in}
\addtolength{\textheight}{1.0in}
\titleformat{\section}{\vspace{-4pt}\scshape\raggedright\large}{}{0em}{}[\titlerule\vspace{-5pt}]
\setlist[itemize]{leftmargin=0.15in, itemsep=1pt, topsep=2pt}

\begin{document}
";

const CLOSING: &str = "\\end{document}\n";

/// Separator between items on one line.
const SEPARATOR: &str = r" $|$ ";

/// Renders the full document. Sections appear in a fixed order and any
/// section with nothing to show is left out entirely.
pub fn build_document(resume: &ResumeData) -> String {
    let mut output = String::from(PREAMBLE);

    render_heading(&mut output, resume);

    if let Some(summary) = resume.summary.as_deref().filter(|s| !s.trim().is_empty()) {
        output.push_str("\\section{Summary}\n");
        output.push_str(&escape_latex(summary.trim()));
        output.push_str("\n\n");
    }

    if !resume.education.is_empty() {
        output.push_str("\\section{Education}\n");
        for school in &resume.education {
            render_education(&mut output, school);
        }
    }

    if !resume.work_experience.is_empty() {
        output.push_str("\\section{Experience}\n");
        for job in &resume.work_experience {
            render_experience(&mut output, job);
        }
    }

    if !resume.projects.is_empty() {
        output.push_str("\\section{Projects}\n");
        for project in &resume.projects {
            render_project(&mut output, project);
        }
    }

    let skills: Vec<_> = resume.skills.iter().filter(|g| !g.items.is_empty()).collect();
    if !skills.is_empty() {
        output.push_str("\\section{Skills}\n");
        let lines: Vec<String> = skills
            .iter()
            .map(|group| {
                let items = escape_all(&group.items).join(", ");
                if group.category.trim().is_empty() {
                    items
                } else {
                    format!("\\textbf{{{}}}: {items}", escape_latex(group.category.trim()))
                }
            })
            .collect();
        output.push_str(&lines.join(" \\\\\n"));
        output.push_str("\n\n");
    }

    if !resume.certifications.is_empty() {
        output.push_str("\\section{Certifications}\n\\begin{itemize}\n");
        for cert in &resume.certifications {
            let mut line = format!("\\textbf{{{}}}", escape_latex(&cert.name));
            if let Some(issuer) = &cert.issuer {
                line.push_str(&format!(", {}", escape_latex(issuer)));
            }
            if let Some(date) = &cert.date {
                line.push_str(&format!(" \\hfill {}", escape_latex(date)));
            }
            output.push_str(&format!("  \\item {line}\n"));
        }
        output.push_str("\\end{itemize}\n\n");
    }

    output.push_str(CLOSING);
    output
}

fn render_heading(output: &mut String, resume: &ResumeData) {
    output.push_str("\\begin{center}\n");
    output.push_str(&format!(
        "  {{\\Huge \\scshape {}}}\n",
        escape_latex(resume.name.trim())
    ));

    let mut contact: Vec<String> = Vec::new();
    if let Some(email) = &resume.email {
        contact.push(format!(
            "\\href{{mailto:{}}}{{{}}}",
            escape_url(email),
            escape_latex(email)
        ));
    }
    if let Some(phone) = &resume.phone {
        contact.push(escape_latex(phone));
    }
    if let Some(location) = &resume.location {
        contact.push(escape_latex(location));
    }
    for link in &resume.links {
        let label = if link.label.trim().is_empty() {
            &link.url
        } else {
            &link.label
        };
        contact.push(format!(
            "\\href{{{}}}{{{}}}",
            escape_url(&link.url),
            escape_latex(label)
        ));
    }

    if !contact.is_empty() {
        output.push_str(&format!(" \\\\ \\vspace{{2pt}}\n  \\small {}\n", contact.join(SEPARATOR)));
    }
    output.push_str("\\end{center}\n\n");
}

fn render_education(output: &mut String, school: &Education) {
    output.push_str(&format!("\\textbf{{{}}}", escape_latex(&school.institution)));
    if let Some(location) = &school.location {
        output.push_str(&format!(" \\hfill {}", escape_latex(location)));
    }

    let mut degree = escape_latex(&school.degree);
    if let Some(field) = &school.field_of_study {
        degree = if degree.is_empty() {
            escape_latex(field)
        } else {
            format!("{degree}, {}", escape_latex(field))
        };
    }
    if let Some(gpa) = &school.gpa {
        degree.push_str(&format!(" (GPA: {})", escape_latex(gpa)));
    }
    let dates = format_range(&DateRange {
        start_date: school.start_date.clone(),
        end_date: school.end_date.clone(),
    });

    output.push_str(&format!(" \\\\\n\\textit{{{degree}}}"));
    if !dates.is_empty() {
        output.push_str(&format!(" \\hfill {dates}"));
    }
    output.push('\n');
    render_bullets(output, &school.details);
    output.push('\n');
}

fn render_experience(output: &mut String, job: &WorkExperience) {
    let dates = job
        .tenure
        .ranges()
        .iter()
        .filter(|range| !range.is_empty())
        .map(format_range)
        .collect::<Vec<_>>()
        .join(", ");

    output.push_str(&format!("\\textbf{{{}}}", escape_latex(&job.title)));
    if !dates.is_empty() {
        output.push_str(&format!(" \\hfill {dates}"));
    }
    output.push_str(&format!(" \\\\\n\\textit{{{}}}", escape_latex(&job.company)));
    if let Some(location) = &job.location {
        output.push_str(&format!(" \\hfill \\textit{{{}}}", escape_latex(location)));
    }
    output.push('\n');
    render_bullets(output, &job.description);
    output.push('\n');
}

fn render_project(output: &mut String, project: &Project) {
    output.push_str(&format!("\\textbf{{{}}}", escape_latex(&project.name)));
    if !project.technologies.is_empty() {
        output.push_str(&format!(
            "{SEPARATOR}\\emph{{{}}}",
            escape_all(&project.technologies).join(", ")
        ));
    }
    if let Some(link) = &project.link {
        output.push_str(&format!(
            " \\hfill \\href{{{}}}{{{}}}",
            escape_url(link),
            escape_latex(link)
        ));
    }
    output.push('\n');
    render_bullets(output, &project.description);
    output.push('\n');
}

/// An empty itemize environment does not compile, so no bullets means no list.
fn render_bullets(output: &mut String, bullets: &[String]) {
    let bullets: Vec<&String> = bullets.iter().filter(|b| !b.trim().is_empty()).collect();
    if bullets.is_empty() {
        return;
    }
    output.push_str("\\begin{itemize}\n");
    for bullet in bullets {
        output.push_str(&format!("  \\item {}\n", escape_latex(bullet.trim())));
    }
    output.push_str("\\end{itemize}\n");
}

/// `start -- end`, `start -- Present` for an open range, or whichever side exists.
fn format_range(range: &DateRange) -> String {
    match (&range.start_date, &range.end_date) {
        (Some(start), Some(end)) => format!("{} -- {}", escape_latex(start), escape_latex(end)),
        (Some(start), None) => format!("{} -- Present", escape_latex(start)),
        (None, Some(end)) => escape_latex(end),
        (None, None) => String::new(),
    }
}

fn escape_all(items: &[String]) -> Vec<String> {
    items.iter().map(String::as_str).map(escape_latex).collect()
}
