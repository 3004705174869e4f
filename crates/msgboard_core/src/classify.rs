use crate::{ApiError, ApiFailure};

/// Maps a raised error plus a human context string to one display string.
///
/// Deterministic, side-effect free, and never panics. HTTP statuses with a
/// known meaning use the fixed table below; other statuses fall back to the
/// bare code, transport failures to a fixed connectivity message, and
/// everything else to a generic unexpected-error line.
pub fn classify(error: &ApiError, context: &str) -> String {
    match error.kind {
        ApiFailure::HttpStatus(status) => match status_message(status) {
            Some(message) => format!("{context}: {message}"),
            None => format!("{context}: HTTP {status}"),
        },
        ApiFailure::Transport => "Network Error - Please check your connection".to_string(),
        ApiFailure::InvalidBody | ApiFailure::Unknown => {
            format!("Unexpected error in {context}: {error}")
        }
    }
}

fn status_message(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("Invalid request data"),
        401 => Some("Authentication required"),
        403 => Some("Access denied"),
        404 => Some("Resource not found"),
        409 => Some("Conflict - resource already exists"),
        422 => Some("Validation failed"),
        429 => Some("Too many requests - please wait"),
        500 => Some("Server error - please try again"),
        502 => Some("Service temporarily unavailable"),
        503 => Some("Service unavailable"),
        _ => None,
    }
}
