//! Error types

mod api;
mod auth;
mod table;

pub use api::*;
pub use auth::*;
pub use table::*;

/// Top-level error returned by client and collaborator calls.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A token could not be obtained.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A table operation was rejected locally.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl Error {
    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(err) => err.status_code(),
            _ => None,
        }
    }

    /// Returns `true` if repeating the call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Api(err) if err.is_retryable())
    }
}

/// A cloneable summary of a failed list fetch.
///
/// Stored in [`FetchState::Failed`](crate::table::FetchState::Failed) so the
/// host can render an error state with a retry affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// Human-readable reason.
    pub message: String,
    /// HTTP status, when the server answered.
    pub status: Option<u16>,
    /// The failure looked transient (network, timeout, 429 or 5xx).
    pub retryable: bool,
}

impl FetchFailure {
    /// Creates a failure with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            retryable: false,
        }
    }
}

impl From<&Error> for FetchFailure {
    fn from(err: &Error) -> Self {
        Self {
            message: err.to_string(),
            status: err.status_code(),
            retryable: err.is_retryable(),
        }
    }
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "[{}] {}", status, self.message),
            None => f.write_str(&self.message),
        }
    }
}
