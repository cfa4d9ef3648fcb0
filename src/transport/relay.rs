//! Relay fallback transport
//!
//! Wraps a base transport. A request is first sent directly; if that fails
//! for any reason (no response, non-2xx, or a body that is not JSON) it is
//! retried exactly once
//! through a public relay that fetches the target server-side and echoes
//! its body unchanged. A relay failure is returned to the caller.

use crate::{error::ApiError, transport::Transport};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::sync::Arc;

/// Transport that retries failed requests through a URL relay
pub struct RelayTransport {
    inner: Arc<dyn Transport>,
    relay_url: Url,
}

impl RelayTransport {
    /// Wraps `inner`, routing retries through `relay_url`
    ///
    /// The target URL is passed to the relay as the escaped `url` query
    /// parameter.
    pub fn new(inner: Arc<dyn Transport>, relay_url: &str) -> Result<Self, ApiError> {
        let relay_url = Url::parse(relay_url)
            .map_err(|e| ApiError::Client(format!("Invalid relay URL {}: {}", relay_url, e)))?;

        Ok(Self { inner, relay_url })
    }

    /// Builds the relay URL that fetches `target`
    pub fn relayed(&self, target: &Url) -> Url {
        let mut url = self.relay_url.clone();
        url.query_pairs_mut().append_pair("url", target.as_str());
        url
    }
}

#[async_trait]
impl Transport for RelayTransport {
    async fn get(&self, url: &Url) -> Result<Value, ApiError> {
        let direct_error = match self.inner.get(url).await {
            Ok(body) => return Ok(body),
            Err(e) => e,
        };

        tracing::warn!(
            url = %url,
            transport = self.inner.transport_name(),
            error = %direct_error,
            "Direct request failed, retrying through relay"
        );

        self.inner.get(&self.relayed(url)).await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "Both direct and relay requests failed");
            e
        })
    }

    fn transport_name(&self) -> &'static str {
        "relay"
    }
}
