//! CoinGecko API client
//!
//! Builds parameterized GET requests, sends them through a [`Transport`]
//! and decodes the JSON bodies. Whether failed requests are retried via the
//! relay is decided by the transport picked at construction time.

use crate::{
    config::TrackerConfig,
    constants::{
        COINGECKO_COIN_ENDPOINT, COINGECKO_MARKETS_ENDPOINT, COINGECKO_SIMPLE_PRICE_ENDPOINT,
        COINGECKO_TRENDING_ENDPOINT,
    },
    error::ApiError,
    transport::{HttpTransport, RelayTransport, Transport},
    types::{CoinInfo, MarketListingEntry, PriceSnapshot, TrendingEntry, TrendingResponse},
};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// CoinGecko API client
pub struct CoinGeckoClient {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl CoinGeckoClient {
    /// Creates a client from configuration
    ///
    /// A direct HTTP transport is always created; it is wrapped in a
    /// [`RelayTransport`] when `use_relay_fallback` is set.
    pub fn from_config(config: &TrackerConfig) -> Result<Self, ApiError> {
        let direct: Arc<dyn Transport> = Arc::new(HttpTransport::new(config.request_timeout)?);

        let transport: Arc<dyn Transport> = if config.use_relay_fallback {
            Arc::new(RelayTransport::new(direct, &config.relay_url)?)
        } else {
            direct
        };

        Ok(Self::with_transport(&config.api_base_url, transport))
    }

    /// Creates a client with a custom transport
    ///
    /// This is primarily for testing with mock transports.
    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    /// Returns the name of the transport in use
    pub fn transport_name(&self) -> &'static str {
        self.transport.transport_name()
    }

    /// Fetches price, 24h change, 24h volume and market cap for each id
    ///
    /// Ids unknown to the API are absent from the snapshot; that is not an
    /// error.
    pub async fn fetch_simple_price<S: AsRef<str>>(
        &self,
        ids: &[S],
        vs_currencies: &[&str],
    ) -> Result<PriceSnapshot, ApiError> {
        if ids.is_empty() {
            return Ok(PriceSnapshot::default());
        }

        let ids = ids.iter().map(|id| id.as_ref()).collect::<Vec<_>>().join(",");
        let currencies = vs_currencies.join(",");

        let url = self.build_url(
            COINGECKO_SIMPLE_PRICE_ENDPOINT,
            &[
                ("ids", ids.as_str()),
                ("vs_currencies", currencies.as_str()),
                ("include_24hr_change", "true"),
                ("include_24hr_vol", "true"),
                ("include_market_cap", "true"),
            ],
        )?;

        let snapshot: PriceSnapshot = self.get_json(&url).await?;
        tracing::debug!(count = snapshot.len(), "Fetched simple prices");

        Ok(snapshot)
    }

    /// Fetches one page of assets ordered by market cap, descending
    pub async fn fetch_market_listing(
        &self,
        vs_currency: &str,
        page_size: usize,
    ) -> Result<Vec<MarketListingEntry>, ApiError> {
        let per_page = page_size.to_string();
        let url = self.build_url(
            COINGECKO_MARKETS_ENDPOINT,
            &[
                ("vs_currency", vs_currency),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", "1"),
                ("sparkline", "false"),
            ],
        )?;

        let listing: Vec<MarketListingEntry> = self.get_json(&url).await?;
        tracing::debug!(count = listing.len(), "Fetched market listing");

        Ok(listing)
    }

    /// Fetches the currently trending assets in API rank order
    ///
    /// Capping the list is left to the caller.
    pub async fn fetch_trending(&self) -> Result<Vec<TrendingEntry>, ApiError> {
        let url = self.build_url(COINGECKO_TRENDING_ENDPOINT, &[])?;

        let response: TrendingResponse = self.get_json(&url).await?;
        let entries: Vec<TrendingEntry> = response.coins.into_iter().map(|c| c.item).collect();
        tracing::debug!(count = entries.len(), "Fetched trending assets");

        Ok(entries)
    }

    /// Fetches detailed information for a single coin
    pub async fn fetch_coin_info(&self, id: &str) -> Result<CoinInfo, ApiError> {
        if id.is_empty() || id.contains('/') {
            return Err(ApiError::Client(format!("Invalid coin id: {:?}", id)));
        }

        let path = format!("{}/{}", COINGECKO_COIN_ENDPOINT, id);
        let url = self.build_url(
            &path,
            &[
                ("localization", "false"),
                ("tickers", "false"),
                ("community_data", "false"),
                ("developer_data", "false"),
            ],
        )?;

        self.get_json(&url).await
    }

    /// Builds the request URL for `endpoint` with query parameters
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url, endpoint);
        let url = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        };

        url.map_err(|e| ApiError::Client(format!("Invalid URL {}: {}", raw, e)))
    }

    /// Sends the request and maps the JSON body onto `T`
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ApiError> {
        let body = self.transport.get(url).await?;

        serde_json::from_value(body).map_err(|e| {
            ApiError::invalid_response(format!(
                "Unexpected response shape from {}: {}",
                url.path(),
                e
            ))
        })
    }
}
