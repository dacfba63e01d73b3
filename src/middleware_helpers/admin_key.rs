use crate::{errors::ServiceError, AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Header carrying the administrative API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Guards the administrative routes when `admin_api_key` is configured.
pub async fn require_admin_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.config.admin_api_key.as_deref() else {
        return next.run(request).await;
    };

    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match presented {
        Some(key) if key == expected => next.run(request).await,
        Some(_) => {
            tracing::warn!(uri = %request.uri(), "rejected admin request with invalid API key");
            ServiceError::Unauthorized("invalid API key".into()).into_response()
        }
        None => ServiceError::Unauthorized(format!("missing {} header", API_KEY_HEADER))
            .into_response(),
    }
}
