use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use backdate_core::AppError;

use crate::error::ApiResult;
use crate::state::AppState;

/// Admits requests carrying the host's shared bearer secret.
pub async fn require_hook_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("bearer token required".to_owned()))?;

    if !secrets_match(presented.trim(), state.hook_shared_secret.as_str()) {
        return Err(AppError::Unauthorized("invalid bearer token".to_owned()).into());
    }

    Ok(next.run(request).await)
}

fn secrets_match(presented: &str, expected: &str) -> bool {
    let presented = presented.as_bytes();
    let expected = expected.as_bytes();
    if presented.len() != expected.len() {
        return false;
    }

    presented
        .iter()
        .zip(expected)
        .fold(0_u8, |difference, (left, right)| difference | (left ^ right))
        == 0
}
