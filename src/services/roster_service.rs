use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::database::{accompanist_repo, application_repo, college_repo};
use crate::database::accompanist_repo::NewAccompanist;
use crate::error::AppError;

// Every roster mutation checks the college lock first: once a college is
// final approved its applications, accompanists and event assignments are
// read-only forever.
async fn ensure_roster_open(pool: &SqlitePool, college_id: &str) -> Result<(), AppError> {
    match college_repo::is_final_approved(pool, college_id).await? {
        None => Err(AppError::CollegeNotFound),
        Some(true) => Err(AppError::RosterLocked),
        Some(false) => Ok(()),
    }
}

pub struct NewAccompanistRequest {
    pub student_id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub accompanist_type: Option<String>,
    pub is_team_manager: bool,
    pub photo_url: Option<String>,
    pub id_card_url: Option<String>,
}

pub async fn create_accompanist(
    pool: &SqlitePool,
    college_id: &str,
    request: NewAccompanistRequest,
) -> Result<String, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::InvalidRequest("name must not be empty"));
    }
    ensure_roster_open(pool, college_id).await?;

    let accompanist_id = Uuid::new_v4().to_string();
    accompanist_repo::insert_accompanist(
        pool,
        NewAccompanist {
            accompanist_id: &accompanist_id,
            college_id,
            student_id: request.student_id.as_deref(),
            name: request.name.trim(),
            email: request.email.as_deref(),
            phone: request.phone.as_deref(),
            accompanist_type: request.accompanist_type.as_deref(),
            is_team_manager: request.is_team_manager,
            photo_url: request.photo_url.as_deref(),
            id_card_url: request.id_card_url.as_deref(),
        },
    )
    .await?;

    info!(college_id, accompanist_id = %accompanist_id, "accompanist_created");
    Ok(accompanist_id)
}

pub async fn remove_accompanist(
    pool: &SqlitePool,
    college_id: &str,
    accompanist_id: &str,
) -> Result<(), AppError> {
    ensure_roster_open(pool, college_id).await?;

    let Some(accompanist) = accompanist_repo::load_active(pool, college_id, accompanist_id).await?
    else {
        return Err(AppError::AccompanistNotFound);
    };
    if accompanist.is_team_manager != 0 {
        return Err(AppError::TeamManagerProtected);
    }

    let removed = accompanist_repo::soft_delete(pool, college_id, accompanist_id).await?;
    if removed != 1 {
        return Err(AppError::AccompanistNotFound);
    }

    info!(college_id, accompanist_id, "accompanist_removed");
    Ok(())
}

pub async fn review_application(
    pool: &SqlitePool,
    reviewer_college_id: &str,
    application_id: &str,
    action: &str,
    reviewer_id: &str,
) -> Result<String, AppError> {
    let status = match action {
        "approve" => "APPROVED",
        "reject" => "REJECTED",
        _ => return Err(AppError::InvalidRequest("action must be approve or reject")),
    };

    let Some(application) = application_repo::load_application(pool, application_id).await? else {
        return Err(AppError::ApplicationNotFound);
    };
    if application.college_id != reviewer_college_id {
        return Err(AppError::Unauthorized);
    }
    ensure_roster_open(pool, &application.college_id).await?;

    let updated = application_repo::review_application(pool, application_id, status, reviewer_id).await?;
    if updated != 1 {
        return Err(AppError::ApplicationNotFound);
    }

    info!(application_id, status, reviewer = reviewer_id, "application_reviewed");
    Ok(status.to_string())
}
