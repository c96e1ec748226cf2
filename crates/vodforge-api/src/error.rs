//! Error type for calls against the encoding platform.
//!
//! Every failed call surfaces as one [`Error`]. The platform wraps its own
//! failures in an error envelope which is decoded into [`Error::Api`] so the
//! caller sees the platform's message instead of a bare HTTP status.

use serde::Deserialize;

/// Errors returned by [`crate::BitmovinClient`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced an HTTP response (DNS, TLS, timeout, ...).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-success status.
    #[error("API error {status} on {path}: {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Request path relative to the API base URL.
        path: String,
        /// Platform error code, when the body carried one.
        code: Option<i64>,
        /// Human-readable message.
        message: String,
        /// Additional message aimed at developers.
        developer_message: Option<String>,
        /// Texts of the detail entries attached to the error.
        details: Vec<String>,
    },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        /// Request path relative to the API base URL.
        path: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A call was made with arguments the client refuses to send.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Convenience constructor for [`Error::InvalidArgument`].
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build an [`Error::Api`] from a failed response body.
    ///
    /// Bodies that are not an error envelope are kept verbatim as the message.
    pub(crate) fn from_response(status: u16, path: &str, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => {
                let data = envelope.data;
                Self::Api {
                    status,
                    path: path.to_string(),
                    code: data.code,
                    message: data
                        .message
                        .unwrap_or_else(|| format!("request failed with status {status}")),
                    developer_message: data.developer_message,
                    details: data.details.into_iter().filter_map(|d| d.text).collect(),
                }
            }
            Err(_) => Self::Api {
                status,
                path: path.to_string(),
                code: None,
                message: if body.trim().is_empty() {
                    format!("request failed with status {status}")
                } else {
                    body.trim().to_string()
                },
                developer_message: None,
                details: Vec::new(),
            },
        }
    }

    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result alias for platform calls.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    data: ErrorData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorData {
    code: Option<i64>,
    message: Option<String>,
    developer_message: Option<String>,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_is_decoded() {
        let body = r#"{
            "requestId": "r-1",
            "status": "ERROR",
            "data": {
                "code": 1001,
                "message": "Invalid input",
                "developerMessage": "bucketName must not be empty",
                "details": [{"text": "bucketName: required", "type": "ERROR"}]
            }
        }"#;

        let err = Error::from_response(400, "/encoding/inputs/s3", body);
        match err {
            Error::Api {
                status,
                code,
                message,
                developer_message,
                details,
                ..
            } => {
                assert_eq!(status, 400);
                assert_eq!(code, Some(1001));
                assert_eq!(message, "Invalid input");
                assert_eq!(
                    developer_message.as_deref(),
                    Some("bucketName must not be empty")
                );
                assert_eq!(details, vec!["bucketName: required".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_plain_body_is_kept_as_message() {
        let err = Error::from_response(502, "/encoding/encodings", "Bad Gateway");
        assert_eq!(
            err.to_string(),
            "API error 502 on /encoding/encodings: Bad Gateway"
        );
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_empty_body_gets_generic_message() {
        let err = Error::from_response(500, "/x", "  ");
        assert_eq!(err.to_string(), "API error 500 on /x: request failed with status 500");
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = Error::invalid_argument("muxing has no streams");
        assert_eq!(err.to_string(), "Invalid argument: muxing has no streams");
        assert_eq!(err.status(), None);
    }
}
