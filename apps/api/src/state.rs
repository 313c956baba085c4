use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::profile::extract::ResumeExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    /// Pluggable extraction backend. Default: `LlmResumeExtractor`.
    pub extractor: Arc<dyn ResumeExtractor>,
    pub config: Config,
}
