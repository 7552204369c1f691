// Document generation. Deterministic, no LLM calls.

pub mod document;
pub mod latex;

pub use document::build_document;
pub use latex::{escape_latex, escape_url};
