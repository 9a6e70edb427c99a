//! Controller for summary generation.

use crate::controller::required_video_id;
use crate::params::video::VideoQuery;
use crate::{AppState, Error};

use axum::extract::{Host, Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;

use domain::summary as SummaryApi;
use log::*;

/// GET /api/summary
///
/// Summarize a video's transcript through the generative language API. The
/// transcript comes from this service's own transcript endpoint, so that
/// call's error responses pass through with their original status.
#[utoipa::path(
    get,
    path = "/api/summary",
    params(VideoQuery),
    responses(
        (status = 200, description = "Summary generated"),
        (status = 400, description = "Missing videoId query parameter"),
        (status = 500, description = "Unexpected failure"),
    )
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    Host(host): Host,
    headers: HeaderMap,
    Query(params): Query<VideoQuery>,
) -> Result<impl IntoResponse, Error> {
    let video_id = required_video_id(&params)?;

    debug!("GET summary for video: {video_id}");

    // Mirror the scheme and host the client used so the internal transcript
    // call lands back on this same server.
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("http");
    let base_url = format!("{scheme}://{host}");

    let summary = SummaryApi::generate(&app_state.config, &base_url, &video_id).await?;

    Ok(Json(summary))
}
