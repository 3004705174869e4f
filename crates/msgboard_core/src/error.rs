use std::fmt;

/// A failure raised at the transport boundary.
///
/// Carries enough information (transport vs. HTTP status) for the classifier
/// to select a display message. Never persisted or retried automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiFailure,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFailure {
    /// No response was obtained (connection refused, DNS failure, aborted).
    Transport,
    /// A response was obtained with a status code outside the success range.
    HttpStatus(u16),
    /// A success response whose body failed to parse as JSON.
    InvalidBody,
    /// Anything not matching the above.
    Unknown,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::Transport => write!(f, "network failure"),
            ApiFailure::HttpStatus(code) => write!(f, "http status {code}"),
            ApiFailure::InvalidBody => write!(f, "invalid response body"),
            ApiFailure::Unknown => write!(f, "unknown failure"),
        }
    }
}
