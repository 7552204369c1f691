//! Keyword normalization: folds surface forms onto one canonical string.

use std::collections::HashSet;

use crate::models::{ExtractedKeywords, KeywordCategory};

/// (alias, canonical). Aliases are matched case-insensitively after whitespace folding.
pub const SYNONYMS: &[(&str, &str)] = &[
    ("js", "JavaScript"),
    ("javascript", "JavaScript"),
    ("ecmascript", "JavaScript"),
    ("ts", "TypeScript"),
    ("typescript", "TypeScript"),
    ("py", "Python"),
    ("python", "Python"),
    ("python3", "Python"),
    ("golang", "Go"),
    ("rust", "Rust"),
    ("rustlang", "Rust"),
    ("c++", "C++"),
    ("cpp", "C++"),
    ("c#", "C#"),
    ("csharp", "C#"),
    ("java", "Java"),
    ("k8s", "Kubernetes"),
    ("kubernetes", "Kubernetes"),
    ("docker", "Docker"),
    ("aws", "AWS"),
    ("amazon web services", "AWS"),
    ("gcp", "Google Cloud Platform"),
    ("google cloud", "Google Cloud Platform"),
    ("google cloud platform", "Google Cloud Platform"),
    ("azure", "Azure"),
    ("microsoft azure", "Azure"),
    ("postgres", "PostgreSQL"),
    ("postgresql", "PostgreSQL"),
    ("psql", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("mongo", "MongoDB"),
    ("mongodb", "MongoDB"),
    ("redis", "Redis"),
    ("node", "Node.js"),
    ("nodejs", "Node.js"),
    ("node.js", "Node.js"),
    ("react", "React"),
    ("reactjs", "React"),
    ("react.js", "React"),
    ("vue", "Vue.js"),
    ("vuejs", "Vue.js"),
    ("vue.js", "Vue.js"),
    ("angularjs", "Angular"),
    ("angular", "Angular"),
    ("django", "Django"),
    ("flask", "Flask"),
    ("graphql", "GraphQL"),
    ("rest", "REST APIs"),
    ("rest api", "REST APIs"),
    ("rest apis", "REST APIs"),
    ("restful apis", "REST APIs"),
    ("ci/cd", "CI/CD"),
    ("cicd", "CI/CD"),
    ("continuous integration", "CI/CD"),
    ("terraform", "Terraform"),
    ("kafka", "Kafka"),
    ("apache kafka", "Kafka"),
    ("spark", "Apache Spark"),
    ("apache spark", "Apache Spark"),
    ("sql", "SQL"),
    ("nosql", "NoSQL"),
    ("git", "Git"),
    ("linux", "Linux"),
    ("ml", "Machine Learning"),
    ("machine learning", "Machine Learning"),
    ("dl", "Deep Learning"),
    ("deep learning", "Deep Learning"),
    ("nlp", "Natural Language Processing"),
    ("natural language processing", "Natural Language Processing"),
    ("pytorch", "PyTorch"),
    ("tensorflow", "TensorFlow"),
    ("tf", "TensorFlow"),
    ("agile", "Agile"),
    ("scrum", "Scrum"),
    ("aws saa", "AWS Certified Solutions Architect"),
    ("aws solutions architect", "AWS Certified Solutions Architect"),
    ("aws certified solutions architect", "AWS Certified Solutions Architect"),
    ("cka", "Certified Kubernetes Administrator"),
    ("certified kubernetes administrator", "Certified Kubernetes Administrator"),
    ("pmp", "PMP"),
    ("project management professional", "PMP"),
    ("cissp", "CISSP"),
    ("bs", "Bachelor's Degree"),
    ("b.s.", "Bachelor's Degree"),
    ("bachelor's", "Bachelor's Degree"),
    ("bachelors", "Bachelor's Degree"),
    ("bachelor's degree", "Bachelor's Degree"),
    ("ms", "Master's Degree"),
    ("m.s.", "Master's Degree"),
    ("master's", "Master's Degree"),
    ("masters", "Master's Degree"),
    ("master's degree", "Master's Degree"),
    ("phd", "PhD"),
    ("ph.d.", "PhD"),
    ("saas", "SaaS"),
    ("fintech", "FinTech"),
    ("b2b", "B2B"),
];

/// Trims and collapses internal whitespace.
fn fold_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the canonical spelling of a keyword. Unknown keywords keep their
/// source casing, whitespace-folded.
pub fn canonicalize(raw: &str) -> String {
    let folded = fold_whitespace(raw);
    let lookup = folded.to_lowercase();
    SYNONYMS
        .iter()
        .find(|(alias, _)| *alias == lookup)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(folded)
}

/// Comparison key: canonical form, lowercased.
pub fn keyword_key(raw: &str) -> String {
    canonicalize(raw).to_lowercase()
}

/// Canonicalizes and de-duplicates (case-insensitively, first occurrence wins).
pub fn normalize_list(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| canonicalize(&item))
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}

pub fn normalize_keywords(keywords: &mut ExtractedKeywords) {
    for category in KeywordCategory::ALL {
        let list = keywords.get_mut(category);
        *list = normalize_list(std::mem::take(list));
    }
}
