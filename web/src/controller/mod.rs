use crate::params::video::VideoQuery;
use crate::Error;

pub(crate) mod health_check_controller;
pub(crate) mod summary_controller;
pub(crate) mod transcript_controller;


/// Validates the required `videoId` query parameter, trimming whitespace.
pub(crate) fn required_video_id(params: &VideoQuery) -> Result<String, Error> {
    let video_id = params.video_id.as_deref().unwrap_or_default().trim();
    if video_id.is_empty() {
        return Err(missing_param_error("videoId"));
    }
    Ok(video_id.to_string())
}

/// Helper to create a missing-parameter error
fn missing_param_error(name: &str) -> Error {
    Error::from(domain::error::Error {
        source: None,
        error_kind: domain::error::DomainErrorKind::Request(
            domain::error::RequestErrorKind::MissingParam(name.to_string()),
        ),
    })
}
