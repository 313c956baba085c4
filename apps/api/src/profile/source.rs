//! Resume Text Acquisition — locates the best available resume data for a
//! candidate.
//!
//! Lookup order: caller-supplied object or text, then the parse cache, then
//! the most recent application row carrying resume text. A forced refresh
//! ignores a cached *structured* parse (that is exactly what the caller is
//! invalidating) but will still re-extract cached raw text.

use serde_json::Value;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::ApplicationRow;
use crate::profile::cache::get_cached_parse;
use crate::profile::models::ExtractedResume;

/// What the acquisition step found.
pub enum ResumeSource {
    /// A structured object that can skip extraction entirely.
    Structured(ExtractedResume),
    /// Raw text that still needs to go through the model.
    Raw(String),
}

pub struct SuppliedInput {
    pub parsed: Option<Value>,
    pub resume_text: Option<String>,
}

/// Resolves the resume source for a candidate, or `None` when no tier
/// yields anything usable.
pub async fn resolve_source(
    pool: &PgPool,
    candidate_id: Uuid,
    supplied: SuppliedInput,
    forced: bool,
) -> Result<Option<ResumeSource>, AppError> {
    // Tier 1: caller-provided data wins outright.
    if let Some(parsed) = supplied.parsed {
        match parsed {
            Value::String(text) => return Ok(Some(ResumeSource::Raw(text))),
            obj @ Value::Object(_) => {
                let structured: ExtractedResume = serde_json::from_value(obj)
                    .map_err(|e| AppError::ExtractionParse(e.to_string()))?;
                return Ok(Some(ResumeSource::Structured(structured)));
            }
            other => {
                return Err(AppError::Validation(format!(
                    "'parsed' must be an object or a string, got {}",
                    json_type_name(&other)
                )))
            }
        }
    }
    if let Some(text) = supplied.resume_text.filter(|t| !t.trim().is_empty()) {
        return Ok(Some(ResumeSource::Raw(text)));
    }

    // Tier 2: the parse cache.
    if let Some(cache) = get_cached_parse(pool, candidate_id)
        .await
        .map_err(AppError::Internal)?
    {
        match cache.parsed {
            Value::String(text) => return Ok(Some(ResumeSource::Raw(text))),
            obj @ Value::Object(_) if !forced => match serde_json::from_value(obj) {
                Ok(structured) => return Ok(Some(ResumeSource::Structured(structured))),
                Err(e) => {
                    // A cache row that no longer fits the schema is not
                    // fatal; fall through to the application rows.
                    warn!("Cached parse for candidate {candidate_id} is unreadable: {e}");
                }
            },
            _ => {}
        }
    }

    // Tier 3: the most recent application with resume text.
    let application: Option<ApplicationRow> = sqlx::query_as(
        r#"
        SELECT * FROM applications
        WHERE candidate_id = $1
          AND (parsed_text IS NOT NULL OR resume_text IS NOT NULL)
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(candidate_id)
    .fetch_optional(pool)
    .await?;

    if let Some(app) = application {
        if let Some(text) = app
            .parsed_text
            .or(app.resume_text)
            .filter(|t| !t.trim().is_empty())
        {
            return Ok(Some(ResumeSource::Raw(text)));
        }
    }

    Ok(None)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
