//! Direct HTTP transport backed by reqwest

use crate::{
    constants::{REQUEST_TIMEOUT_SECS, USER_AGENT},
    error::ApiError,
    transport::{decode_body, Transport},
};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

/// Sends requests straight to the target URL
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a new transport with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self { client })
    }

    /// Creates a transport using the default request timeout
    pub fn with_default_timeout() -> Result<Self, ApiError> {
        Self::new(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<Value, ApiError> {
        tracing::debug!(url = %url, "Sending request");

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::http(status.as_u16(), url.as_str()));
        }

        let body = response.text().await?;
        tracing::debug!(url = %url, bytes = body.len(), "Request succeeded");

        decode_body(url, &body)
    }

    fn transport_name(&self) -> &'static str {
        "direct"
    }
}
