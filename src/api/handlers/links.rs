//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse, ListLinksQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// {
///   "targetUrl": "https://example.com/some/long/path",
///   "code": "ABC123"   // optional, 6-8 alphanumeric characters
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed body, URL or code.
/// Returns 409 Conflict if the custom code is taken.
/// Returns 500 if no unique code could be generated or the store fails.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .create_link(payload.target_url, payload.code)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, &state.base_url)),
    ))
}

/// Lists links, newest first.
///
/// # Endpoint
///
/// `GET /links?q={term}`
///
/// # Query Parameters
///
/// - `q` (optional): case-insensitive substring of the code or target URL
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(query): Query<ListLinksQuery>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links(query.q).await?;

    Ok(Json(
        links
            .into_iter()
            .map(|link| LinkResponse::from_link(link, &state.base_url))
            .collect(),
    ))
}

/// Returns a single link with its click statistics.
///
/// # Endpoint
///
/// `GET /links/{code}`
///
/// Does not count as a click.
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn get_link_handler(
    path: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let Path(code) = path?;
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}

/// Deletes a link permanently.
///
/// # Endpoint
///
/// `DELETE /links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist or was already deleted.
pub async fn delete_link_handler(
    path: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let Path(code) = path?;
    state.link_service.delete_link(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
