use std::error::Error as StdError;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domain::error::{
    DomainErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind, RequestErrorKind,
};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// The single adapter turning domain failures into HTTP responses. Upstream
// statuses are forwarded rather than flattened: the caller sees the
// provider's own status plus `{error, details}`, and internal-hop failures
// pass through byte for byte.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let source_details = self.0.source.as_ref().map(|source| source.to_string());

        match self.0.error_kind {
            DomainErrorKind::Request(RequestErrorKind::MissingParam(name)) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("{name} query parameter is required") })),
            )
                .into_response(),
            DomainErrorKind::Internal(InternalErrorKind::Config(message)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
            DomainErrorKind::Internal(InternalErrorKind::Other(message)) => {
                server_error(source_details.unwrap_or(message))
            }
            DomainErrorKind::External(ExternalErrorKind::Network) => server_error(
                source_details.unwrap_or_else(|| "Upstream network failure".to_string()),
            ),
            DomainErrorKind::External(ExternalErrorKind::Upstream {
                status,
                error,
                details,
            }) => (
                status_or_bad_gateway(status),
                Json(json!({ "error": error, "details": details })),
            )
                .into_response(),
            DomainErrorKind::External(ExternalErrorKind::Forwarded { status, body }) => (
                status_or_bad_gateway(status),
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response(),
            DomainErrorKind::External(ExternalErrorKind::Other(message)) => {
                server_error(source_details.unwrap_or(message))
            }
        }
    }
}

/// Catch-all 500 used for unexpected internal failures.
fn server_error(details: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Server error", "details": details })),
    )
        .into_response()
}

fn status_or_bad_gateway(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    fn domain_error(error_kind: DomainErrorKind) -> Error {
        Error(DomainError {
            source: None,
            error_kind,
        })
    }

    async fn response_parts(error: Error) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_param_maps_to_400_with_a_message() {
        let error = domain_error(DomainErrorKind::Request(RequestErrorKind::MissingParam(
            "videoId".to_string(),
        )));

        let (status, body) = response_parts(error).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "videoId query parameter is required");
    }

    #[tokio::test]
    async fn config_errors_map_to_500_with_the_message() {
        let error = domain_error(DomainErrorKind::Internal(InternalErrorKind::Config(
            "RAPIDAPI_URL must contain the {videoId} placeholder".to_string(),
        )));

        let (status, body) = response_parts(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "RAPIDAPI_URL must contain the {videoId} placeholder"
        );
    }

    #[tokio::test]
    async fn upstream_errors_keep_the_provider_status() {
        let error = domain_error(DomainErrorKind::External(ExternalErrorKind::Upstream {
            status: 403,
            error: "RapidAPI error".to_string(),
            details: "forbidden".to_string(),
        }));

        let (status, body) = response_parts(error).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "RapidAPI error");
        assert_eq!(body["details"], "forbidden");
    }

    #[tokio::test]
    async fn forwarded_responses_pass_through_verbatim() {
        let error = domain_error(DomainErrorKind::External(ExternalErrorKind::Forwarded {
            status: 404,
            body: r#"{"error":"RapidAPI error","details":"no transcript"}"#.to_string(),
        }));

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            bytes.as_ref(),
            br#"{"error":"RapidAPI error","details":"no transcript"}"#
        );
    }

    #[tokio::test]
    async fn everything_else_is_a_server_error() {
        let error = domain_error(DomainErrorKind::External(ExternalErrorKind::Network));

        let (status, body) = response_parts(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Server error");
        assert!(body["details"].is_string());
    }
}
