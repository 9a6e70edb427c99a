use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// GET liveness probe; never touches an upstream.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "API router is up and responding to requests"),
    )
)]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "ok": true })))
}
