use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{
    CandidateProfileRow, CertificateRow, EducationRow, ExperienceRow, LanguageRow, ProjectRow,
    SkillRow,
};
use crate::profile::pipeline::{run_pipeline, ParseParams};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseProfileRequest {
    /// Required; left optional here so a missing identity maps to a clean
    /// 400 instead of Axum's rejection.
    pub candidate_id: Option<Uuid>,
    pub resume_text: Option<String>,
    /// Pre-parsed structured object (or raw-text string) supplied by the caller.
    pub parsed: Option<Value>,
    #[serde(default)]
    pub force_refresh: bool,
}

#[derive(Debug, Serialize)]
pub struct ParseProfileResponse {
    pub success: bool,
    pub message: String,
    pub profile: Value,
    pub warnings: Vec<String>,
}

/// POST /api/v1/profile/parse
pub async fn handle_parse_profile(
    State(state): State<AppState>,
    Json(req): Json<ParseProfileRequest>,
) -> Result<Json<ParseProfileResponse>, AppError> {
    let candidate_id = req
        .candidate_id
        .ok_or_else(|| AppError::Validation("candidate_id is required".to_string()))?;

    let outcome = run_pipeline(
        &state.db,
        &state.s3,
        &state.config.s3_bucket,
        state.extractor.as_ref(),
        ParseParams {
            candidate_id,
            resume_text: req.resume_text,
            parsed: req.parsed,
            force_refresh: req.force_refresh,
        },
    )
    .await?;

    Ok(Json(ParseProfileResponse {
        success: true,
        message: outcome.message,
        profile: outcome.profile,
        warnings: outcome.warnings,
    }))
}

#[derive(Deserialize)]
pub struct CandidateIdQuery {
    pub candidate_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Option<CandidateProfileRow>,
    pub skills: Vec<SkillRow>,
    pub languages: Vec<LanguageRow>,
    pub experience: Vec<ExperienceRow>,
    pub education: Vec<EducationRow>,
    pub certificates: Vec<CertificateRow>,
    pub projects: Vec<ProjectRow>,
}

/// GET /api/v1/profile
/// Read-back of the profile row plus all six collections.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<CandidateIdQuery>,
) -> Result<Json<ProfileResponse>, AppError> {
    let candidate_id = params.candidate_id;

    let profile: Option<CandidateProfileRow> =
        sqlx::query_as("SELECT * FROM candidate_profiles WHERE candidate_id = $1")
            .bind(candidate_id)
            .fetch_optional(&state.db)
            .await?;

    let skills: Vec<SkillRow> =
        sqlx::query_as("SELECT * FROM candidate_skills WHERE candidate_id = $1 ORDER BY level DESC")
            .bind(candidate_id)
            .fetch_all(&state.db)
            .await?;

    let languages: Vec<LanguageRow> =
        sqlx::query_as("SELECT * FROM candidate_languages WHERE candidate_id = $1 ORDER BY name")
            .bind(candidate_id)
            .fetch_all(&state.db)
            .await?;

    let experience: Vec<ExperienceRow> = sqlx::query_as(
        "SELECT * FROM candidate_experience WHERE candidate_id = $1 ORDER BY start_date DESC",
    )
    .bind(candidate_id)
    .fetch_all(&state.db)
    .await?;

    let education: Vec<EducationRow> = sqlx::query_as(
        "SELECT * FROM candidate_education WHERE candidate_id = $1 ORDER BY start_date DESC",
    )
    .bind(candidate_id)
    .fetch_all(&state.db)
    .await?;

    let certificates: Vec<CertificateRow> = sqlx::query_as(
        "SELECT * FROM candidate_certificates WHERE candidate_id = $1 ORDER BY issue_date DESC",
    )
    .bind(candidate_id)
    .fetch_all(&state.db)
    .await?;

    let projects: Vec<ProjectRow> =
        sqlx::query_as("SELECT * FROM candidate_projects WHERE candidate_id = $1 ORDER BY title")
            .bind(candidate_id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(ProfileResponse {
        profile,
        skills,
        languages,
        experience,
        education,
        certificates,
        projects,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_refresh_defaults_false() {
        let req: ParseProfileRequest = serde_json::from_str(
            r#"{"candidate_id": "8c3f0f1e-2a5b-4e9c-9a1d-6b7e8f9a0b1c"}"#,
        )
        .unwrap();
        assert!(!req.force_refresh);
        assert!(req.resume_text.is_none());
        assert!(req.parsed.is_none());
    }

    #[test]
    fn test_missing_candidate_id_still_deserializes() {
        // The handler turns this into a 400, not a deserialization failure.
        let req: ParseProfileRequest = serde_json::from_str(r#"{"resume_text": "..."}"#).unwrap();
        assert!(req.candidate_id.is_none());
    }

    #[test]
    fn test_parsed_accepts_object_or_string() {
        let req: ParseProfileRequest = serde_json::from_str(
            r#"{"candidate_id": "8c3f0f1e-2a5b-4e9c-9a1d-6b7e8f9a0b1c", "parsed": {"skills": []}}"#,
        )
        .unwrap();
        assert!(req.parsed.as_ref().unwrap().is_object());

        let req: ParseProfileRequest = serde_json::from_str(
            r#"{"candidate_id": "8c3f0f1e-2a5b-4e9c-9a1d-6b7e8f9a0b1c", "parsed": "raw resume text"}"#,
        )
        .unwrap();
        assert!(req.parsed.as_ref().unwrap().is_string());
    }
}
