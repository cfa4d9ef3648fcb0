//! Transport abstraction for issuing GET requests against the price API
//!
//! The API client never talks to reqwest directly; it goes through a
//! `Transport`. Fallback behaviour is layered on by wrapping one transport
//! in another (see [`RelayTransport`]), chosen when the client is built.

pub mod http;
pub mod relay;

#[cfg(test)]
pub mod mock;

pub use http::HttpTransport;
pub use relay::RelayTransport;

use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

/// Trait for request transports
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues one GET for `url` and decodes the body as JSON
    ///
    /// # Returns
    /// The decoded body of a 2xx response, `ApiError::Http` for any other
    /// status, `ApiError::InvalidResponse` for a body that is not JSON, or
    /// `ApiError::Transport` when no response arrived.
    async fn get(&self, url: &Url) -> Result<Value, ApiError>;

    /// Returns the name of this transport
    fn transport_name(&self) -> &'static str;
}

/// Decodes a response body, naming the endpoint on failure
pub(crate) fn decode_body(url: &Url, body: &str) -> Result<Value, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        ApiError::invalid_response(format!(
            "Failed to parse response from {}: {}",
            url.path(),
            e
        ))
    })
}
