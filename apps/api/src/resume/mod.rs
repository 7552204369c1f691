// Structured resume data.
// Implements: extraction from raw text, job-targeted tailoring, instruction-driven editing.
// Both rewriting agents run their output through the non-fabrication guard.

pub mod editor;
pub mod extractor;
pub mod guard;
pub mod handlers;
pub mod prompts;
pub mod tailor;

pub use editor::{EditScope, ResumeEditorAgent};
pub use extractor::ResumeDataExtractor;
pub use tailor::ResumeTailorAgent;
