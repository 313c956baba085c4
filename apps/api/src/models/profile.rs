//! Row types for the candidate profile tables.
//!
//! One singleton profile row per candidate, six candidate-scoped
//! collections replaced wholesale on each successful parse, plus the
//! application rows the acquisition step falls back to and the explicit
//! parse cache consulted by the freshness guard.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateProfileRow {
    pub candidate_id: Uuid,
    pub bio: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub portfolio_url: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub name: String,
    /// Canonical 1-100 proficiency scale.
    pub level: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LanguageRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub name: String,
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExperienceRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub company: String,
    pub title: String,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    /// NULL means "current position".
    pub end_date: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EducationRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub institution: String,
    pub degree: String,
    pub start_date: NaiveDate,
    /// NULL means "ongoing".
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CertificateRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub name: String,
    pub issuer: String,
    pub issue_date: NaiveDate,
    /// NULL means "no expiration".
    pub expiry_date: Option<NaiveDate>,
    pub credential_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub technologies: Vec<String>,
}

/// Application rows are written by the (out-of-scope) job application flow;
/// the pipeline only reads the resume text columns as its last-resort source.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub parsed_text: Option<String>,
    pub resume_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Explicit parse cache keyed by candidate identity.
/// One row per candidate; `force_refresh` is the only invalidation path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ParseCacheRow {
    pub candidate_id: Uuid,
    pub parsed: Value,
    pub extracted_at: DateTime<Utc>,
}
