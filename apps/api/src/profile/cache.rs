//! Explicit parse cache + durable archive.
//!
//! One `resume_parse_cache` row per candidate holds the last successful
//! structured extraction; `force_refresh` on the parse endpoint is the only
//! invalidation path. Each successful parse is also archived to S3 under a
//! timestamped key for recovery and audit.

use anyhow::Result;
use aws_sdk_s3::primitives::ByteStream;
use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::profile::ParseCacheRow;

/// Returns the cached parse for a candidate, if any.
pub async fn get_cached_parse(pool: &PgPool, candidate_id: Uuid) -> Result<Option<ParseCacheRow>> {
    Ok(sqlx::query_as::<_, ParseCacheRow>(
        "SELECT * FROM resume_parse_cache WHERE candidate_id = $1",
    )
    .bind(candidate_id)
    .fetch_optional(pool)
    .await?)
}

/// Stores (or replaces) the candidate's cached parse.
pub async fn store_parse(
    pool: &PgPool,
    candidate_id: Uuid,
    parsed: &serde_json::Value,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO resume_parse_cache (candidate_id, parsed, extracted_at)
        VALUES ($1, $2, now())
        ON CONFLICT (candidate_id)
        DO UPDATE SET parsed = EXCLUDED.parsed, extracted_at = EXCLUDED.extracted_at
        "#,
    )
    .bind(candidate_id)
    .bind(parsed)
    .execute(pool)
    .await?;

    info!("Cached parse for candidate {candidate_id}");
    Ok(())
}

/// Archives the structured parse to S3 under a timestamped key.
/// Callers treat this as best-effort; a failed archive never fails the run.
pub async fn archive_parse(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    candidate_id: Uuid,
    parsed: &serde_json::Value,
) -> Result<String> {
    let key = format!(
        "parses/{}/{}.json",
        candidate_id,
        Utc::now().format("%Y%m%dT%H%M%SZ")
    );
    let body = serde_json::to_vec_pretty(parsed)?;

    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(body))
        .content_type("application/json")
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

    info!("Archived parse to s3://{bucket}/{key}");
    Ok(key)
}
