//! Structured Extraction — pluggable, trait-based resume extractor.
//!
//! Default: `LlmResumeExtractor` (Claude via the shared `llm_client`).
//! `AppState` holds an `Arc<dyn ResumeExtractor>` so tests and future
//! backends can swap the implementation without touching callers.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::profile::models::ExtractedResume;
use crate::profile::prompts::{RESUME_EXTRACT_PROMPT, RESUME_EXTRACT_SYSTEM};

/// Near-deterministic sampling: we want stable structure from the model,
/// not creative rephrasing.
const EXTRACTION_TEMPERATURE: f32 = 0.0;

#[async_trait]
pub trait ResumeExtractor: Send + Sync {
    /// Transforms raw resume text into the structured schema.
    ///
    /// A response that cannot be coerced into the schema surfaces as
    /// `AppError::ExtractionParse`; there is no repair-and-retry of the
    /// prompt (documented limitation).
    async fn extract(&self, resume_text: &str) -> Result<ExtractedResume, AppError>;
}

pub struct LlmResumeExtractor {
    llm: LlmClient,
}

impl LlmResumeExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeExtractor for LlmResumeExtractor {
    async fn extract(&self, resume_text: &str) -> Result<ExtractedResume, AppError> {
        let prompt = RESUME_EXTRACT_PROMPT.replace("{resume_text}", resume_text);
        self.llm
            .call_json::<ExtractedResume>(&prompt, RESUME_EXTRACT_SYSTEM, EXTRACTION_TEMPERATURE)
            .await
            .map_err(|e| match e {
                LlmError::Parse(parse_err) => AppError::ExtractionParse(parse_err.to_string()),
                other => AppError::Llm(format!("Resume extraction failed: {other}")),
            })
    }
}
