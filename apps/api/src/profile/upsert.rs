//! Profile Upsert — persists a normalized profile.
//!
//! The singleton profile row is updated in place; COALESCE keeps a
//! previously stored value whenever the new extraction came back empty for
//! that column. Each of the six collections is fully replaced (delete all
//! candidate-scoped rows, then bulk insert) inside its own transaction, and
//! the six replacements run concurrently. A failed collection is logged and
//! reported as a warning; it never aborts its siblings.

use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::profile::dates::materialize_start;
use crate::profile::normalize::NormalizedProfile;

/// Result of a persistence pass. `warnings` names each collection whose
/// replacement failed.
#[derive(Debug, Default)]
pub struct UpsertOutcome {
    pub warnings: Vec<String>,
}

pub async fn upsert_profile(
    pool: &PgPool,
    candidate_id: Uuid,
    profile: &NormalizedProfile,
) -> Result<UpsertOutcome, AppError> {
    update_profile_row(pool, candidate_id, profile).await?;

    // The six collections are independent; dispatch them concurrently.
    // Within each one, the delete must land before the insert — that
    // ordering lives inside the per-collection transaction.
    let (skills, languages, experience, education, certificates, projects) = tokio::join!(
        replace_skills(pool, candidate_id, profile),
        replace_languages(pool, candidate_id, profile),
        replace_experience(pool, candidate_id, profile),
        replace_education(pool, candidate_id, profile),
        replace_certificates(pool, candidate_id, profile),
        replace_projects(pool, candidate_id, profile),
    );

    let mut outcome = UpsertOutcome::default();
    let results = [
        ("skills", skills),
        ("languages", languages),
        ("experience", experience),
        ("education", education),
        ("certificates", certificates),
        ("projects", projects),
    ];
    for (collection, result) in results {
        if let Err(e) = result {
            error!("Failed to replace {collection} for candidate {candidate_id}: {e}");
            outcome
                .warnings
                .push(format!("failed to update {collection}"));
        }
    }

    info!(
        "Profile upsert for candidate {candidate_id} complete ({} collection failures)",
        outcome.warnings.len()
    );
    Ok(outcome)
}

/// Updates the singleton profile row, never overwriting a populated column
/// with an empty extraction value.
async fn update_profile_row(
    pool: &PgPool,
    candidate_id: Uuid,
    profile: &NormalizedProfile,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO candidate_profiles
            (candidate_id, bio, title, location, phone,
             portfolio_url, github_url, linkedin_url, twitter_url, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now())
        ON CONFLICT (candidate_id) DO UPDATE SET
            bio = COALESCE(EXCLUDED.bio, candidate_profiles.bio),
            title = COALESCE(EXCLUDED.title, candidate_profiles.title),
            location = COALESCE(EXCLUDED.location, candidate_profiles.location),
            phone = COALESCE(EXCLUDED.phone, candidate_profiles.phone),
            portfolio_url = COALESCE(EXCLUDED.portfolio_url, candidate_profiles.portfolio_url),
            github_url = COALESCE(EXCLUDED.github_url, candidate_profiles.github_url),
            linkedin_url = COALESCE(EXCLUDED.linkedin_url, candidate_profiles.linkedin_url),
            twitter_url = COALESCE(EXCLUDED.twitter_url, candidate_profiles.twitter_url),
            updated_at = now()
        "#,
    )
    .bind(candidate_id)
    .bind(&profile.bio)
    .bind(&profile.title)
    .bind(&profile.location)
    .bind(&profile.phone)
    .bind(&profile.links.portfolio)
    .bind(&profile.links.github)
    .bind(&profile.links.linkedin)
    .bind(&profile.links.twitter)
    .execute(pool)
    .await?;
    Ok(())
}

async fn replace_skills(
    pool: &PgPool,
    candidate_id: Uuid,
    profile: &NormalizedProfile,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM candidate_skills WHERE candidate_id = $1")
        .bind(candidate_id)
        .execute(&mut *tx)
        .await?;
    for skill in &profile.skills {
        sqlx::query(
            "INSERT INTO candidate_skills (id, candidate_id, name, level) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(candidate_id)
        .bind(&skill.name)
        .bind(skill.level)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

async fn replace_languages(
    pool: &PgPool,
    candidate_id: Uuid,
    profile: &NormalizedProfile,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM candidate_languages WHERE candidate_id = $1")
        .bind(candidate_id)
        .execute(&mut *tx)
        .await?;
    for language in &profile.languages {
        sqlx::query(
            "INSERT INTO candidate_languages (id, candidate_id, name, proficiency) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(candidate_id)
        .bind(&language.name)
        .bind(&language.proficiency)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

async fn replace_experience(
    pool: &PgPool,
    candidate_id: Uuid,
    profile: &NormalizedProfile,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM candidate_experience WHERE candidate_id = $1")
        .bind(candidate_id)
        .execute(&mut *tx)
        .await?;
    for exp in &profile.experience {
        let start_date = materialize_start(
            exp.start_date,
            &format!("experience at {}", exp.company),
        );
        sqlx::query(
            r#"
            INSERT INTO candidate_experience
                (id, candidate_id, company, title, location, start_date,
                 end_date, current, description, skills)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(candidate_id)
        .bind(&exp.company)
        .bind(&exp.title)
        .bind(&exp.location)
        .bind(start_date)
        .bind(exp.end_date)
        .bind(exp.current)
        .bind(&exp.description)
        .bind(&exp.skills)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

async fn replace_education(
    pool: &PgPool,
    candidate_id: Uuid,
    profile: &NormalizedProfile,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM candidate_education WHERE candidate_id = $1")
        .bind(candidate_id)
        .execute(&mut *tx)
        .await?;
    for edu in &profile.education {
        let start_date = materialize_start(
            edu.start_date,
            &format!("education at {}", edu.institution),
        );
        sqlx::query(
            r#"
            INSERT INTO candidate_education
                (id, candidate_id, institution, degree, start_date, end_date, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(candidate_id)
        .bind(&edu.institution)
        .bind(&edu.degree)
        .bind(start_date)
        .bind(edu.end_date)
        .bind(&edu.description)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

async fn replace_certificates(
    pool: &PgPool,
    candidate_id: Uuid,
    profile: &NormalizedProfile,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM candidate_certificates WHERE candidate_id = $1")
        .bind(candidate_id)
        .execute(&mut *tx)
        .await?;
    for cert in &profile.certificates {
        let issue_date =
            materialize_start(cert.issue_date, &format!("certificate {}", cert.name));
        sqlx::query(
            r#"
            INSERT INTO candidate_certificates
                (id, candidate_id, name, issuer, issue_date, expiry_date, credential_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(candidate_id)
        .bind(&cert.name)
        .bind(&cert.issuer)
        .bind(issue_date)
        .bind(cert.expiry_date)
        .bind(&cert.credential_id)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

async fn replace_projects(
    pool: &PgPool,
    candidate_id: Uuid,
    profile: &NormalizedProfile,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM candidate_projects WHERE candidate_id = $1")
        .bind(candidate_id)
        .execute(&mut *tx)
        .await?;
    for project in &profile.projects {
        sqlx::query(
            r#"
            INSERT INTO candidate_projects
                (id, candidate_id, title, description, link, technologies)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(candidate_id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.link)
        .bind(&project.technologies)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}
