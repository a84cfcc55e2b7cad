use thiserror::Error;

/// Shown when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong, please try again";

/// Failures reported by the backend or by the call that reaches it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Rejected(String),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("Request timed out after {0} ms")]
    Timeout(u64),
}

impl RemoteError {
    /// Flattens the error into the single line shown in a snackbar.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Errors raised when talking to an editor service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("Editor service closed")]
    Closed,
    #[error("Editor service dropped the request")]
    Dropped,
}
