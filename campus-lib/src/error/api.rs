//! Failures talking to the campus backend.

use std::time::Duration;

/// A request to the backend that did not produce a usable answer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx status; `message` is the server's `message` field when present.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Connection-level failure reported by reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// No answer within the client's configured timeout.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The base URL and resource path do not join into a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The body was not the JSON shape the resource expects.
    #[error("Response parse error: {message}")]
    Parse {
        message: String,
        /// The offending body, kept for the log.
        body: Option<String>,
    },

    /// 2xx answer carrying `success: false`.
    #[error("Request rejected: {message}")]
    Rejected { message: String },
}

impl ApiError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Wraps a decode error together with the body that failed to decode.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        if let Self::Http { status, .. } = self {
            Some(*status)
        } else {
            None
        }
    }

    /// Whether sending the same request again may succeed.
    ///
    /// Gateway and throttling statuses, dropped connections and timeouts
    /// qualify. Client errors, bad bodies and rejections never do.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Network(_) | Self::Timeout(_) => true,
            Self::InvalidUrl(_) | Self::Parse { .. } | Self::Rejected { .. } => false,
        }
    }
}
