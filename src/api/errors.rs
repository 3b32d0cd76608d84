use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Network failure or non-success response from the passenger API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    /// HTTP status when the server answered at all.
    pub status: Option<u16>,
    /// Server-provided body text or the client-side failure description.
    pub message: String,
}

impl TransportError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "server responded with {status}: {}", self.message),
            None => write!(f, "request failed: {}", self.message),
        }
    }
}

impl std::error::Error for TransportError {}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("unexpected response format: {0}")]
    Format(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(TransportError {
            status: err.status().map(|status| status.as_u16()),
            message: err.to_string(),
        })
    }
}
