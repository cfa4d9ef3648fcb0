//! Constants for the crypto terminal
//!
//! All configuration is centralized here. No runtime configuration file is
//! used; `TrackerConfig::default()` is built from these values.

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko endpoint for simple price queries
pub const COINGECKO_SIMPLE_PRICE_ENDPOINT: &str = "/simple/price";

/// CoinGecko endpoint for the market listing
pub const COINGECKO_MARKETS_ENDPOINT: &str = "/coins/markets";

/// CoinGecko endpoint for trending searches
pub const COINGECKO_TRENDING_ENDPOINT: &str = "/search/trending";

/// CoinGecko endpoint prefix for coin details (`/coins/{id}`)
pub const COINGECKO_COIN_ENDPOINT: &str = "/coins";

/// Public relay that fetches `?url=` server-side and echoes the raw body
pub const RELAY_URL: &str = "https://api.allorigins.win/raw";

/// How often the auto-refresh timer fires (in seconds)
pub const REFRESH_INTERVAL_SECS: u64 = 30;

/// How often the clock element is updated (in seconds)
pub const CLOCK_INTERVAL_SECS: u64 = 1;

/// Shortest period accepted for the refresh timer and the clock (in seconds)
pub const MIN_INTERVAL_SECS: u64 = 1;

/// HTTP request timeout, applied to direct and relayed requests (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "crypto-terminal/0.1.0";

/// Quote currency used by every panel
pub const DEFAULT_VS_CURRENCY: &str = "usd";

/// Tokens under surveillance, as (id, display name)
pub const WATCHED_TOKENS: &[(&str, &str)] = &[("berachain-bera", "BERA"), ("hyperliquid", "HYPE")];

/// Reference assets shown ahead of the watched set in the major-assets panel
pub const REFERENCE_ASSETS: &[&str] = &["bitcoin", "ethereum"];

/// Number of entries in the top-assets panel
pub const TOP_ASSETS_LIMIT: usize = 5;

/// Number of entries in the trending panel
pub const TRENDING_LIMIT: usize = 5;
