//! Controller for transcript retrieval.

use crate::controller::required_video_id;
use crate::params::video::VideoQuery;
use crate::{AppState, Error};

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use domain::transcript as TranscriptApi;
use log::*;

/// GET /api/transcript
///
/// Fetch the transcript for a video from the upstream provider and
/// normalize it to plain text.
#[utoipa::path(
    get,
    path = "/api/transcript",
    params(VideoQuery),
    responses(
        (status = 200, description = "Transcript retrieved and normalized"),
        (status = 400, description = "Missing videoId query parameter"),
        (status = 500, description = "Misconfigured URL template or unexpected failure"),
    )
)]
pub async fn get_transcript(
    State(app_state): State<AppState>,
    Query(params): Query<VideoQuery>,
) -> Result<impl IntoResponse, Error> {
    let video_id = required_video_id(&params)?;

    debug!("GET transcript for video: {video_id}");

    let transcript = TranscriptApi::fetch(&app_state.config, &video_id).await?;

    Ok(Json(transcript))
}
