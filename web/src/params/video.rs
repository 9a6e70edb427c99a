use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters shared by the transcript and summary endpoints.
#[derive(Debug, Deserialize, IntoParams)]
pub struct VideoQuery {
    /// ID of the video to look up.
    #[serde(default, rename = "videoId")]
    pub video_id: Option<String>,
}
