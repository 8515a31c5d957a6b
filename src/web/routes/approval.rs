use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{json, Value};
use tracing::warn;

use crate::database::{college_repo, final_participant_repo};
use crate::error::AppError;
use crate::services::final_approval_service;
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedPrincipal;

// The core operation: one-shot, irrevocable, principal-only.
pub async fn final_approval_handler(
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path(college_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    if !principal.is_principal_of(&college_id) {
        return Err(AppError::Unauthorized);
    }

    let report = final_approval_service::run_final_approval(
        &state.pool,
        &college_id,
        &principal.id,
        &state.config,
    )
    .await
    .map_err(|e| {
        warn!(college_id = %college_id, error = e.kind(), "final_approval_rejected");
        e
    })?;

    Ok(Json(json!({
        "status": "approved",
        "college_id": report.college_id,
        "students_inserted": report.students_inserted,
        "accompanists_inserted": report.accompanists_inserted,
        "duplicates_removed": report.duplicates_removed,
        "total_participants": report.total_participants,
        "codes_remaining": report.codes_remaining,
    })))
}

pub async fn approval_status_handler(
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path(college_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    if !principal.can_manage_roster_of(&college_id) {
        return Err(AppError::Unauthorized);
    }

    let Some(college) = college_repo::load_college(&state.pool, &college_id).await? else {
        return Err(AppError::CollegeNotFound);
    };
    let participants = final_participant_repo::count_for_college(&state.pool, &college_id).await?;

    Ok(Json(json!({
        "college_id": college.college_id,
        "code": college.code,
        "name": college.name,
        "max_participants": college.max_participants,
        "is_final_approved": college.is_final_approved != 0,
        "final_approved_at": college.final_approved_at,
        "final_approved_by": college.final_approved_by,
        "participants": participants,
    })))
}

// Event-day verification and dashboards read the locked roster through here.
pub async fn participants_handler(
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path(college_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    if !principal.can_manage_roster_of(&college_id) {
        return Err(AppError::Unauthorized);
    }
    if college_repo::is_final_approved(&state.pool, &college_id)
        .await?
        .is_none()
    {
        return Err(AppError::CollegeNotFound);
    }

    let rows = final_participant_repo::list_for_college(&state.pool, &college_id).await?;
    let participants: Vec<Value> = rows
        .iter()
        .map(|p| {
            json!({
                "participant_id": p.participant_id,
                "person_type": p.person_type,
                "student_id": p.student_id,
                "accompanist_id": p.accompanist_id,
                "name": p.name,
                "email": p.email,
                "phone": p.phone,
                "gender": p.gender,
                "course": p.course,
                "year_of_study": p.year_of_study,
                "accompanist_type": p.accompanist_type,
                "is_team_manager": p.is_team_manager != 0,
                "photo_url": p.photo_url,
                "id_card_url": p.id_card_url,
                "qr_code": p.qr_code,
                "approved_at": p.approved_at,
            })
        })
        .collect();

    Ok(Json(json!({
        "college_id": college_id,
        "count": participants.len(),
        "participants": participants,
    })))
}
