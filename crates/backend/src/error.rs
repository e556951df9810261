use thiserror::Error;

/// Errors surfaced by admin API gateways.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The backend refused the request on business grounds.
    #[error("{0}")]
    Rejected(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    /// Builds the error for a non-success response.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            404 => ApiError::NotFound(message),
            400 | 409 | 422 => ApiError::Rejected(message),
            _ => ApiError::Status { status, message },
        }
    }

    /// Message suitable for a toast: the backend's own wording when it sent
    /// one, otherwise a generic line.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ApiError::Status { message, .. }
            | ApiError::NotFound(message)
            | ApiError::Rejected(message)
                if !message.is_empty() =>
            {
                message.clone()
            }
            ApiError::Http(e) if e.is_timeout() => "The server took too long to respond".into(),
            ApiError::Http(_) | ApiError::Unavailable(_) => "Could not reach the server".into(),
            ApiError::NotFound(_) => "Not found".into(),
            _ => "Something went wrong".into(),
        }
    }
}
