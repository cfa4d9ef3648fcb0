//! Error types for the crypto terminal

use thiserror::Error;

/// Errors raised by a transport or the API client
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network request failed (no response, connection reset, timeout, body read)
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("HTTP error {status} from {url}")]
    Http { status: u16, url: String },

    /// Invalid response body
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Well-formed response without any usable entries
    #[error("Empty result from {0}")]
    EmptyResult(&'static str),

    /// Client could not be built or a URL could not be assembled
    #[error("Client error: {0}")]
    Client(String),
}

impl ApiError {
    /// Creates an Http error
    pub fn http(status: u16, url: impl Into<String>) -> Self {
        Self::Http {
            status,
            url: url.into(),
        }
    }

    /// Creates an InvalidResponse error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the payload was valid but empty
    pub fn is_empty_result(&self) -> bool {
        matches!(self, ApiError::EmptyResult(_))
    }
}
