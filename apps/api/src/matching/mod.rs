// Resume/job matching.
// Implements: keyword extraction, keyword comparison, holistic comparison, scoring.
// All LLM calls go through llm_client via the TextJudge trait.

pub mod comparator;
pub mod extractor;
pub mod fallback;
pub mod handlers;
pub mod holistic;
pub mod normalize;
pub mod prompts;
pub mod scoring;

pub use comparator::KeywordComparator;
pub use extractor::{extract_from_both, KeywordExtractor, KeywordSource};
pub use fallback::{with_fallback, DictionaryExtractor, WithFallback};
pub use holistic::HolisticComparator;
pub use scoring::ResumeAnalyzer;
