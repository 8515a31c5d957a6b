use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use http::StatusCode;
use serde::Deserialize;

// Identity of the caller for every protected route. Token issuance lives in
// the identity service; this backend only trusts the payload claims.
#[derive(Clone, Debug)]
pub struct AuthenticatedPrincipal {
    pub id: String,
    pub college_id: String,
    pub role: String,
}

impl AuthenticatedPrincipal {
    pub fn is_principal_of(&self, college_id: &str) -> bool {
        self.role == "principal" && self.college_id == college_id
    }

    pub fn can_manage_roster_of(&self, college_id: &str) -> bool {
        (self.role == "principal" || self.role == "team_manager")
            && self.college_id == college_id
    }
}

#[derive(Deserialize)]
struct JwtPayload {
    sub: String,
    college_id: String,
    role: String,
}

pub async fn require_principal(mut request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(header::COOKIE)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split("; ")
                .find(|c| c.starts_with("access_token="))
                .and_then(|c| c.strip_prefix("access_token="))
        });

    if let Some(token) = token {
        // Parse JWT payload (middle part)
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() == 3 {
            if let Ok(payload_bytes) = general_purpose::URL_SAFE_NO_PAD.decode(parts[1]) {
                if let Ok(payload) = serde_json::from_slice::<JwtPayload>(&payload_bytes) {
                    request.extensions_mut().insert(AuthenticatedPrincipal {
                        id: payload.sub,
                        college_id: payload.college_id,
                        role: payload.role,
                    });
                    return next.run(request).await;
                }
            }
        }
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "error": "unauthorized" })),
    )
        .into_response()
}
