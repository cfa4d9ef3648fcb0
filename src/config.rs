//! Tracker configuration
//!
//! There is no config file. Defaults come from `constants`; callers adjust
//! individual fields with the `with_*` methods.

use crate::{
    constants::{
        CLOCK_INTERVAL_SECS, COINGECKO_API_URL, DEFAULT_VS_CURRENCY, MIN_INTERVAL_SECS,
        REFERENCE_ASSETS, REFRESH_INTERVAL_SECS, RELAY_URL, REQUEST_TIMEOUT_SECS,
        TOP_ASSETS_LIMIT, TRENDING_LIMIT, WATCHED_TOKENS,
    },
    types::WatchedToken,
};
use std::time::Duration;

/// Settings for a terminal session
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub api_base_url: String,
    pub relay_url: String,
    /// Wrap the direct transport with the relay fallback
    pub use_relay_fallback: bool,
    pub request_timeout: Duration,
    /// Period of the auto-refresh timer
    pub refresh_interval: Duration,
    pub clock_interval: Duration,
    /// Auto refresh state at startup
    pub auto_refresh: bool,
    pub vs_currency: String,
    pub watched_tokens: Vec<WatchedToken>,
    pub reference_assets: Vec<String>,
    pub top_assets_limit: usize,
    pub trending_limit: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_base_url: COINGECKO_API_URL.to_string(),
            relay_url: RELAY_URL.to_string(),
            use_relay_fallback: true,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            refresh_interval: Duration::from_secs(REFRESH_INTERVAL_SECS),
            clock_interval: Duration::from_secs(CLOCK_INTERVAL_SECS),
            auto_refresh: true,
            vs_currency: DEFAULT_VS_CURRENCY.to_string(),
            watched_tokens: WATCHED_TOKENS
                .iter()
                .map(|(id, name)| WatchedToken::new(*id, *name))
                .collect(),
            reference_assets: REFERENCE_ASSETS.iter().map(|s| s.to_string()).collect(),
            top_assets_limit: TOP_ASSETS_LIMIT,
            trending_limit: TRENDING_LIMIT,
        }
    }
}

impl TrackerConfig {
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_relay_fallback(mut self, enabled: bool) -> Self {
        self.use_relay_fallback = enabled;
        self
    }

    /// Sets the timer period, raised to [`MIN_INTERVAL_SECS`] if shorter
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval.max(Duration::from_secs(MIN_INTERVAL_SECS));
        self
    }

    pub fn with_auto_refresh(mut self, enabled: bool) -> Self {
        self.auto_refresh = enabled;
        self
    }

    pub fn with_watched_tokens(mut self, tokens: Vec<WatchedToken>) -> Self {
        self.watched_tokens = tokens;
        self
    }

    pub fn with_reference_assets(mut self, assets: Vec<String>) -> Self {
        self.reference_assets = assets;
        self
    }
}
