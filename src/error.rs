//! Error types for SendPigeon API operations.

use thiserror::Error;

/// Error returned by any SendPigeon API operation.
///
/// Every failure mode of a call ends up here; no method panics on a bad
/// response. Match on the variant, or use [`Error::code`] and
/// [`Error::status`] when only the wire-level classification matters.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never completed: DNS resolution, connection, or another
    /// transport-level failure before an HTTP response arrived.
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a status outside the 2xx range.
    ///
    /// `message` is taken from the `message` field of the JSON error body
    /// when present, falling back to `Request failed: <status>`.
    #[error("{message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Best-effort message extracted from the response body.
        message: String,
    },

    /// A success response carried a body that did not decode as the
    /// expected JSON shape.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Stable machine-readable kind for this error.
    ///
    /// One of `"network_error"`, `"api_error"`, or `"parse_error"`.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Network(_) => "network_error",
            Error::Api { .. } => "api_error",
            Error::Json(_) => "parse_error",
        }
    }

    /// HTTP status of the failed response, when one was received.
    ///
    /// `None` for transport and decode failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
