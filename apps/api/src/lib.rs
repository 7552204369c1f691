//! Resume/job matching and tailoring engine.
//!
//! `pipeline::Pipeline` is the entry point for library callers; `routes`
//! exposes the same operations over HTTP.

pub mod config;
pub mod errors;
pub mod llm_client;
pub mod matching;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod resume;
pub mod routes;
pub mod state;
