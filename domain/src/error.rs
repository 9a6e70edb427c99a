//! Error types for the `domain` layer.
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// The gateway has three failure surfaces, mirrored by the `error_kind`
/// tree: bad client input, internal misconfiguration, and upstream
/// failures. The `source` field holds the original error when one exists.
/// The kinds carry whatever the `web` layer needs to produce the right HTTP
/// status and body for each case.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Request(RequestErrorKind),
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Client input errors, always reported as a 400 with a message body.
#[derive(Debug, PartialEq)]
pub enum RequestErrorKind {
    MissingParam(String),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Config(String),
    Other(String),
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    /// Transport-level failure talking to an upstream.
    Network,
    /// Non-success status from an upstream provider. The status and raw
    /// body are surfaced to the caller as `{error, details}`.
    Upstream {
        status: u16,
        error: String,
        details: String,
    },
    /// Non-success response from this service's own transcript endpoint,
    /// passed through with its exact status and body.
    Forwarded { status: u16, body: String },
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        // Errors that result from issues with the network call itself.
        } else {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        }
    }
}
