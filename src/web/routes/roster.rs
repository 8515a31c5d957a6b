use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::services::roster_service::{self, NewAccompanistRequest};
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedPrincipal;

#[derive(Debug, Deserialize)]
pub struct CreateAccompanistBody {
    pub name: String,
    pub student_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub accompanist_type: Option<String>,
    pub is_team_manager: Option<bool>,
    pub photo_url: Option<String>,
    pub id_card_url: Option<String>,
}

pub async fn create_accompanist_handler(
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path(college_id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<CreateAccompanistBody>,
) -> Result<Json<Value>, AppError> {
    if !principal.can_manage_roster_of(&college_id) {
        return Err(AppError::Unauthorized);
    }

    let accompanist_id = roster_service::create_accompanist(
        &state.pool,
        &college_id,
        NewAccompanistRequest {
            student_id: body.student_id,
            name: body.name,
            email: body.email,
            phone: body.phone,
            accompanist_type: body.accompanist_type,
            is_team_manager: body.is_team_manager.unwrap_or(false),
            photo_url: body.photo_url,
            id_card_url: body.id_card_url,
        },
    )
    .await?;

    Ok(Json(json!({
        "status": "created",
        "accompanist_id": accompanist_id,
    })))
}

pub async fn remove_accompanist_handler(
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path((college_id, accompanist_id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    if !principal.can_manage_roster_of(&college_id) {
        return Err(AppError::Unauthorized);
    }

    roster_service::remove_accompanist(&state.pool, &college_id, &accompanist_id).await?;

    Ok(Json(json!({
        "status": "removed",
        "accompanist_id": accompanist_id,
    })))
}

#[derive(Debug, Deserialize)]
pub struct ReviewApplicationBody {
    pub action: String, // approve|reject
}

pub async fn review_application_handler(
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path(application_id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<ReviewApplicationBody>,
) -> Result<Json<Value>, AppError> {
    if principal.role != "principal" && principal.role != "team_manager" {
        return Err(AppError::Unauthorized);
    }

    let status = roster_service::review_application(
        &state.pool,
        &principal.college_id,
        &application_id,
        &body.action,
        &principal.id,
    )
    .await?;

    Ok(Json(json!({
        "status": "reviewed",
        "application_id": application_id,
        "application_status": status,
    })))
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
