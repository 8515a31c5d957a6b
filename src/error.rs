use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("caller is not a principal or manager of this college")]
    Unauthorized,

    #[error("college not found")]
    CollegeNotFound,

    #[error("accompanist not found")]
    AccompanistNotFound,

    #[error("application not found")]
    ApplicationNotFound,

    #[error("college is already final approved")]
    AlreadyApproved,

    #[error("roster is locked after final approval")]
    RosterLocked,

    #[error("no eligible participants for final approval")]
    NoEligibleParticipants,

    #[error("qr code pool exhausted: needed {needed}, available {available}")]
    PoolExhausted { needed: i64, available: i64 },

    #[error("concurrent approval attempt in progress, retry the operation")]
    ConcurrentConflict,

    #[error("team managers cannot be removed through accompanist deletion")]
    TeamManagerProtected,

    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),

    #[error("final approval timed out and was rolled back")]
    Timeout,

    #[error("unexpected failure")]
    Unexpected(sqlx::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "unauthorized",
            AppError::CollegeNotFound => "college_not_found",
            AppError::AccompanistNotFound => "accompanist_not_found",
            AppError::ApplicationNotFound => "application_not_found",
            AppError::AlreadyApproved => "already_approved",
            AppError::RosterLocked => "roster_locked",
            AppError::NoEligibleParticipants => "no_eligible_participants",
            AppError::PoolExhausted { .. } => "pool_exhausted",
            AppError::ConcurrentConflict => "concurrent_conflict",
            AppError::TeamManagerProtected => "team_manager_protected",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::Timeout => "timeout",
            AppError::Unexpected(_) => "unexpected_failure",
        }
    }

    // Only a serialization/lock conflict is safe to retry verbatim; every
    // other kind needs a state change first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::ConcurrentConflict)
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::FORBIDDEN,
            AppError::CollegeNotFound
            | AppError::AccompanistNotFound
            | AppError::ApplicationNotFound => StatusCode::NOT_FOUND,
            AppError::AlreadyApproved
            | AppError::RosterLocked
            | AppError::ConcurrentConflict
            | AppError::TeamManagerProtected => StatusCode::CONFLICT,
            AppError::NoEligibleParticipants => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PoolExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Timeout | AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if is_locked(&err) {
            AppError::ConcurrentConflict
        } else {
            AppError::Unexpected(err)
        }
    }
}

// SQLITE_BUSY (5), SQLITE_LOCKED (6) and SQLITE_BUSY_SNAPSHOT (517) all mean
// another writer held the database past busy_timeout.
fn is_locked(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            matches!(db.code().as_deref(), Some("5") | Some("6") | Some("517"))
        }
        _ => false,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Unexpected(e) = &self {
            // Full detail stays server-side; the caller gets a generic body.
            tracing::error!(error = %e, "unexpected_failure");
        }

        let mut body = json!({
            "error": self.kind(),
            "message": self.to_string(),
            "retryable": self.is_retryable(),
        });
        if let AppError::PoolExhausted { needed, available } = &self {
            body["needed"] = json!(needed);
            body["available"] = json!(available);
        }

        (self.status(), Json(body)).into_response()
    }
}
