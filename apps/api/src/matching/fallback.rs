//! Deterministic dictionary extractor and the `with_fallback` combinator.
//!
//! The dictionary extractor needs no model call: it scans the document with a
//! case-insensitive Aho-Corasick automaton over fixed per-category vocabularies
//! (canonical terms plus their unambiguous synonyms) and keeps whole-word hits.

use aho_corasick::{AhoCorasick, MatchKind};
use async_trait::async_trait;
use tracing::warn;

use crate::errors::{require_text, AppError};
use crate::matching::extractor::KeywordSource;
use crate::matching::normalize::{normalize_keywords, SYNONYMS};
use crate::models::{DocumentKind, ExtractedKeywords, KeywordCategory};

/// Canonical terms the dictionary recognizes, per category.
const VOCABULARY: &[(KeywordCategory, &[&str])] = &[
    (
        KeywordCategory::TechnicalSkills,
        &[
            "Python", "JavaScript", "TypeScript", "Rust", "Go", "Java", "C++", "C#", "Ruby",
            "Scala", "Kotlin", "Swift", "PHP", "SQL", "NoSQL", "PostgreSQL", "MySQL", "MongoDB",
            "Redis", "Elasticsearch", "Kafka", "RabbitMQ", "Apache Spark", "Airflow", "Docker",
            "Kubernetes", "Terraform", "Ansible", "AWS", "Azure", "Google Cloud Platform",
            "Linux", "Git", "CI/CD", "Jenkins", "GitHub Actions", "React", "Angular", "Vue.js",
            "Node.js", "Django", "Flask", "FastAPI", "Spring Boot", "GraphQL", "REST APIs",
            "gRPC", "Microservices", "Machine Learning", "Deep Learning",
            "Natural Language Processing", "PyTorch", "TensorFlow", "Pandas", "NumPy",
            "Tableau", "Snowflake", "Excel",
        ],
    ),
    (
        KeywordCategory::SoftSkills,
        &[
            "Leadership", "Communication", "Collaboration", "Teamwork", "Mentoring",
            "Problem Solving", "Critical Thinking", "Time Management", "Stakeholder Management",
            "Adaptability", "Ownership", "Attention to Detail", "Cross-functional",
        ],
    ),
    (
        KeywordCategory::Certifications,
        &[
            "AWS Certified Solutions Architect", "Certified Kubernetes Administrator", "PMP",
            "CISSP", "CompTIA Security+", "Certified ScrumMaster", "Google Professional Cloud Architect",
            "Azure Administrator",
        ],
    ),
    (
        KeywordCategory::ExperienceKeywords,
        &[
            "Agile", "Scrum", "Code Review", "System Design", "Distributed Systems",
            "Technical Leadership", "Production Support", "On-call", "Performance Optimization",
            "Architecture", "Testing", "Debugging",
        ],
    ),
    (
        KeywordCategory::EducationKeywords,
        &[
            "Bachelor's Degree", "Master's Degree", "PhD", "Computer Science",
            "Software Engineering", "Mathematics", "Statistics", "Electrical Engineering",
        ],
    ),
    (
        KeywordCategory::IndustryTerms,
        &[
            "FinTech", "SaaS", "B2B", "E-commerce", "Healthcare", "Cybersecurity", "Payments",
            "Logistics", "AdTech", "EdTech",
        ],
    ),
];

/// Aliases too short or too common in ordinary prose to match on their own.
const AMBIGUOUS_ALIASES: &[&str] = &[
    "go", "js", "ts", "py", "ml", "dl", "tf", "bs", "ms", "rest", "node", "spark",
];

pub struct DictionaryExtractor {
    matcher: AhoCorasick,
    /// Pattern index → (category, canonical term).
    targets: Vec<(KeywordCategory, &'static str)>,
}

impl DictionaryExtractor {
    pub fn new() -> Result<Self, AppError> {
        let mut patterns: Vec<String> = Vec::new();
        let mut targets = Vec::new();

        for (category, terms) in VOCABULARY {
            for &term in terms.iter() {
                if !AMBIGUOUS_ALIASES.contains(&term.to_lowercase().as_str()) {
                    patterns.push(term.to_string());
                    targets.push((*category, term));
                }
                for (alias, canonical) in SYNONYMS {
                    if *canonical == term
                        && !alias.eq_ignore_ascii_case(term)
                        && !AMBIGUOUS_ALIASES.contains(alias)
                    {
                        patterns.push(alias.to_string());
                        targets.push((*category, term));
                    }
                }
            }
        }

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build keyword dictionary: {e}")))?;

        Ok(Self { matcher, targets })
    }
}

#[async_trait]
impl KeywordSource for DictionaryExtractor {
    async fn extract(&self, text: &str, kind: DocumentKind) -> Result<ExtractedKeywords, AppError> {
        require_text(kind.as_str(), text)?;

        let mut keywords = ExtractedKeywords::default();
        for hit in self.matcher.find_iter(text) {
            if !is_whole_word(text, hit.start(), hit.end()) {
                continue;
            }
            let (category, canonical) = self.targets[hit.pattern().as_usize()];
            keywords.get_mut(category).push(canonical.to_string());
        }
        normalize_keywords(&mut keywords);
        Ok(keywords)
    }
}

fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.map(char::is_alphanumeric).unwrap_or(false)
        && !after.map(char::is_alphanumeric).unwrap_or(false)
}

/// Primary source with a fallback. Any primary failure other than rejected
/// caller input is logged and answered by the fallback instead.
pub struct WithFallback<P, F> {
    primary: P,
    fallback: F,
}

pub fn with_fallback<P, F>(primary: P, fallback: F) -> WithFallback<P, F>
where
    P: KeywordSource,
    F: KeywordSource,
{
    WithFallback { primary, fallback }
}

#[async_trait]
impl<P, F> KeywordSource for WithFallback<P, F>
where
    P: KeywordSource,
    F: KeywordSource,
{
    async fn extract(&self, text: &str, kind: DocumentKind) -> Result<ExtractedKeywords, AppError> {
        match self.primary.extract(text, kind).await {
            Ok(keywords) => Ok(keywords),
            Err(AppError::Validation(msg)) => Err(AppError::Validation(msg)),
            Err(e) => {
                warn!("Primary keyword extraction for {kind} failed, using fallback: {e}");
                self.fallback.extract(text, kind).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::llm_client::fake::FakeJudge;
    use crate::matching::extractor::KeywordExtractor;

    #[tokio::test]
    async fn test_dictionary_finds_terms_and_synonyms() {
        let dictionary = DictionaryExtractor::new().unwrap();
        let keywords = dictionary
            .extract(
                "Senior engineer: Python, Django, Amazon Web Services and k8s. \
                 Strong communication. B.S. in Computer Science. FinTech background.",
                DocumentKind::Resume,
            )
            .await
            .unwrap();
        assert_eq!(
            keywords.technical_skills,
            vec!["Python", "Django", "AWS", "Kubernetes"]
        );
        assert_eq!(keywords.soft_skills, vec!["Communication"]);
        assert!(keywords.education_keywords.contains(&"Computer Science".to_string()));
        assert_eq!(keywords.industry_terms, vec!["FinTech"]);
    }

    #[tokio::test]
    async fn test_dictionary_requires_whole_words() {
        let dictionary = DictionaryExtractor::new().unwrap();
        let keywords = dictionary
            .extract("Rusty javascripting gitlab", DocumentKind::Resume)
            .await
            .unwrap();
        assert!(keywords.technical_skills.is_empty());
    }

    #[tokio::test]
    async fn test_dictionary_skips_ambiguous_short_aliases() {
        let dictionary = DictionaryExtractor::new().unwrap();
        let keywords = dictionary
            .extract("Let's go over the rest in 5 ms.", DocumentKind::JobDescription)
            .await
            .unwrap();
        assert!(keywords.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_used_when_primary_fails() {
        let judge = Arc::new(FakeJudge::new().unavailable("KEYWORD EXTRACTION"));
        let source = with_fallback(
            KeywordExtractor::new(judge.clone()),
            DictionaryExtractor::new().unwrap(),
        );
        let keywords = source
            .extract("We need Python and Kubernetes.", DocumentKind::JobDescription)
            .await
            .unwrap();
        assert_eq!(keywords.technical_skills, vec!["Python", "Kubernetes"]);
        assert_eq!(judge.calls(), 1);
    }

    #[tokio::test]
    async fn test_fallback_not_used_when_primary_succeeds() {
        let judge = Arc::new(FakeJudge::new().respond(
            "KEYWORD EXTRACTION",
            r#"{"technical_skills": ["Elixir"]}"#,
        ));
        let source = with_fallback(
            KeywordExtractor::new(judge),
            DictionaryExtractor::new().unwrap(),
        );
        let keywords = source
            .extract("We need Python and Elixir.", DocumentKind::JobDescription)
            .await
            .unwrap();
        assert_eq!(keywords.technical_skills, vec!["Elixir"]);
    }

    #[tokio::test]
    async fn test_fallback_never_masks_blank_input() {
        let source = with_fallback(
            DictionaryExtractor::new().unwrap(),
            DictionaryExtractor::new().unwrap(),
        );
        let err = source.extract("", DocumentKind::Resume).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
