use thiserror::Error;

/// Errors produced while talking to the remote API.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Server { status: u16, message: Option<String> },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Invalid response body: {0}")]
    Decode(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ApiError {
    /// The `message` field of a failed response body, if the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
