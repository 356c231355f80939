use thiserror::Error;

/// Errors from polling a remote API or writing its results
#[derive(Error, Debug)]
pub enum PollError {
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("request error: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PollError {
    /// HTTP status code, when the server answered with a non-success status
    pub fn status(&self) -> Option<u16> {
        match self {
            PollError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
