//! Resume ingestion & profile normalization pipeline.
//!
//! One request/response invocation per run: acquire resume text, extract a
//! structured object through the LLM, normalize dates, replace the six
//! candidate collections, cache and archive the parse.

pub mod cache;
pub mod dates;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod prompts;
pub mod source;
pub mod upsert;
