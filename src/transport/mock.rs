//! Mock transport for testing

use crate::{
    error::ApiError,
    transport::{decode_body, Transport},
};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Status(u16),
    Network,
}

/// Replies with canned bodies or failures, matched by URL fragment
///
/// Rules are checked in insertion order; the first rule whose fragment
/// occurs in the requested URL wins. Unmatched URLs answer 404.
pub struct MockTransport {
    rules: Mutex<Vec<(String, Reply)>>,
    calls: Mutex<Vec<String>>,
    delay: Mutex<Option<Duration>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            rules: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            delay: Mutex::new(None),
        }
    }

    pub fn respond(&self, fragment: &str, body: &str) {
        self.push(fragment, Reply::Body(body.to_string()));
    }

    pub fn fail_status(&self, fragment: &str, status: u16) {
        self.push(fragment, Reply::Status(status));
    }

    pub fn fail_network(&self, fragment: &str) {
        self.push(fragment, Reply::Network);
    }

    /// Holds every reply for `delay` before answering
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Drops every rule, keeping the call log
    pub fn clear(&self) {
        self.rules.lock().unwrap().clear();
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn push(&self, fragment: &str, reply: Reply) {
        self.rules
            .lock()
            .unwrap()
            .push((fragment.to_string(), reply));
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &Url) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push(url.to_string());

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .find(|(fragment, _)| url.as_str().contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Body(body)) => decode_body(url, &body),
            Some(Reply::Status(status)) => Err(ApiError::http(status, url.as_str())),
            // reqwest errors cannot be built by hand; a client error stands in
            Some(Reply::Network) => Err(ApiError::Client(format!("connection refused: {}", url))),
            None => Err(ApiError::http(404, url.as_str())),
        }
    }

    fn transport_name(&self) -> &'static str {
        "mock"
    }
}
