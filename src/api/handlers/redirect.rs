//! Handler for short URL redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL and records the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Atomically increment the click counter and read the target URL
/// 2. Return 307 Temporary Redirect
///
/// The click is recorded exactly once per redirect served.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist or the path segment
/// is not a decodable code. Store failures are logged where they occur and
/// also answered with 404.
pub async fn redirect_handler(
    path: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Response {
    let code = match path {
        Ok(Path(code)) => code,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };

    match state.link_service.resolve_and_record_click(&code).await {
        Ok(target_url) => Redirect::temporary(&target_url).into_response(),
        Err(err @ AppError::NotFound { .. }) => err.into_response(),
        Err(_) => {
            AppError::not_found("Short link not found", json!({ "code": code })).into_response()
        }
    }
}
