//! Types for the crypto terminal

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A token under surveillance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WatchedToken {
    /// CoinGecko id
    pub id: String,
    /// Name shown on the card
    pub display_name: String,
}

impl WatchedToken {
    /// Create a new watched token
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Resolves the name shown for `id`, falling back to the upper-cased id
pub fn display_name_for(tokens: &[WatchedToken], id: &str) -> String {
    tokens
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.display_name.clone())
        .unwrap_or_else(|| id.to_uppercase())
}

/// Response of the simple price endpoint
///
/// Keyed by token id, then by field (`usd`, `usd_24h_change`, `usd_24h_vol`,
/// `usd_market_cap`, ...). Ids the API does not know are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSnapshot {
    entries: HashMap<String, HashMap<String, Option<f64>>>,
}

impl PriceSnapshot {
    /// Number of tokens present in the snapshot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if the API returned an entry for `id`
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Quote for `id` in `currency`
    ///
    /// Returns `None` when the id is absent or carries no price in that
    /// currency. Secondary fields stay `None` when the API omitted them.
    pub fn quote(&self, id: &str, currency: &str) -> Option<TokenQuote> {
        let fields = self.entries.get(id)?;
        let field = |suffix: &str| -> Option<f64> {
            let key = if suffix.is_empty() {
                currency.to_string()
            } else {
                format!("{}_{}", currency, suffix)
            };
            fields.get(&key).copied().flatten()
        };

        Some(TokenQuote {
            price: field("")?,
            change_24h: field("24h_change"),
            volume_24h: field("24h_vol"),
            market_cap: field("market_cap"),
        })
    }
}

/// Price data for one token in one currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenQuote {
    pub price: f64,
    /// 24h price change percentage
    pub change_24h: Option<f64>,
    pub volume_24h: Option<f64>,
    pub market_cap: Option<f64>,
}

/// One entry of the market listing, ordered by market cap descending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketListingEntry {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
}

/// Envelope of the trending endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct TrendingResponse {
    #[serde(default)]
    pub coins: Vec<TrendingCoin>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrendingCoin {
    pub item: TrendingEntry,
}

/// A trending asset, in the rank order given by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub score: Option<u32>,
}

/// Detailed coin information from `/coins/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinInfo {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub market_data: Option<CoinMarketData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinMarketData {
    #[serde(default)]
    pub current_price: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub market_cap: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub total_volume: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

impl CoinInfo {
    /// Current price in `currency`, if reported
    pub fn price_in(&self, currency: &str) -> Option<f64> {
        self.market_data
            .as_ref()
            .and_then(|m| m.current_price.get(currency).copied().flatten())
    }

    /// Market cap in `currency`, if reported
    pub fn market_cap_in(&self, currency: &str) -> Option<f64> {
        self.market_data
            .as_ref()
            .and_then(|m| m.market_cap.get(currency).copied().flatten())
    }

    /// Total 24h volume in `currency`, if reported
    pub fn volume_in(&self, currency: &str) -> Option<f64> {
        self.market_data
            .as_ref()
            .and_then(|m| m.total_volume.get(currency).copied().flatten())
    }

    pub fn change_24h(&self) -> Option<f64> {
        self.market_data
            .as_ref()
            .and_then(|m| m.price_change_percentage_24h)
    }
}

/// Colour class of a change value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeClass {
    Positive,
    Negative,
    Neutral,
}

impl ChangeClass {
    /// CSS-style class name
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeClass::Positive => "change-positive",
            ChangeClass::Negative => "change-negative",
            ChangeClass::Neutral => "change-neutral",
        }
    }
}

/// Direction indicator of a change value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendArrow {
    Up,
    Down,
    Flat,
}

impl TrendArrow {
    pub fn symbol(&self) -> &'static str {
        match self {
            TrendArrow::Up => "↗",
            TrendArrow::Down => "↘",
            TrendArrow::Flat => "→",
        }
    }
}

impl std::fmt::Display for TrendArrow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Global status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshStatus {
    /// Nothing loaded yet
    Idle,
    /// A refresh cycle is running
    InProgress,
    /// Every panel's call succeeded
    AllOperational,
    /// At least one panel's call raised
    PartialFailure,
}

impl RefreshStatus {
    /// Text shown on the status line
    pub fn message(&self) -> &'static str {
        match self {
            RefreshStatus::Idle => "INITIALIZING...",
            RefreshStatus::InProgress => "SYNCHRONIZING DATA STREAMS...",
            RefreshStatus::AllOperational => "SURVEILLANCE ACTIVE - ALL SYSTEMS OPERATIONAL",
            RefreshStatus::PartialFailure => "SYSTEM ERROR - PARTIAL DATA AVAILABLE",
        }
    }
}

impl std::fmt::Display for RefreshStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Visibility of the display surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Visible,
    Hidden,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_reads_currency_fields() {
        let snapshot: PriceSnapshot = serde_json::from_str(
            r#"{"hyperliquid":{"usd":38.12,"usd_24h_change":-2.5,"usd_24h_vol":1.2e8,"usd_market_cap":1.3e10}}"#,
        )
        .unwrap();

        let quote = snapshot.quote("hyperliquid", "usd").unwrap();
        assert_eq!(quote.price, 38.12);
        assert_eq!(quote.change_24h, Some(-2.5));
        assert_eq!(quote.volume_24h, Some(1.2e8));
        assert_eq!(quote.market_cap, Some(1.3e10));
        assert!(snapshot.quote("hyperliquid", "eur").is_none());
        assert!(snapshot.quote("bitcoin", "usd").is_none());
    }

    #[test]
    fn test_quote_tolerates_null_fields() {
        let snapshot: PriceSnapshot =
            serde_json::from_str(r#"{"berachain-bera":{"usd":2.1,"usd_24h_change":null}}"#)
                .unwrap();

        let quote = snapshot.quote("berachain-bera", "usd").unwrap();
        assert_eq!(quote.change_24h, None);
        assert_eq!(quote.volume_24h, None);
    }

    #[test]
    fn test_display_name_falls_back_to_uppercase_id() {
        let tokens = vec![WatchedToken::new("hyperliquid", "HYPE")];
        assert_eq!(display_name_for(&tokens, "hyperliquid"), "HYPE");
        assert_eq!(display_name_for(&tokens, "bitcoin"), "BITCOIN");
    }

    #[test]
    fn test_coin_info_accessors() {
        let info: CoinInfo = serde_json::from_str(
            r#"{"id":"bitcoin","symbol":"btc","name":"Bitcoin","market_cap_rank":1,
                "market_data":{"current_price":{"usd":64000.5},"market_cap":{"usd":1.2e12},
                "total_volume":{"usd":3.0e10},"price_change_percentage_24h":1.25}}"#,
        )
        .unwrap();

        assert_eq!(info.price_in("usd"), Some(64000.5));
        assert_eq!(info.market_cap_in("usd"), Some(1.2e12));
        assert_eq!(info.volume_in("usd"), Some(3.0e10));
        assert_eq!(info.change_24h(), Some(1.25));
        assert_eq!(info.price_in("eur"), None);
    }
}
