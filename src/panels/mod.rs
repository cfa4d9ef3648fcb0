//! Panel renderers
//!
//! Each panel fetches its own data through the API client and turns it into
//! structured content. Failures never leave a panel: a renderer converts any
//! error into a placeholder for its own panel only.

pub mod major;
pub mod monitored;
pub mod top;
pub mod trending;

pub use major::MajorAssetsPanel;
pub use monitored::MonitoredTokensPanel;
pub use top::TopAssetsPanel;
pub use trending::TrendingPanel;

use crate::{
    client::CoinGeckoClient,
    config::TrackerConfig,
    error::ApiError,
    formatter::{change_class, format_percent_change, trend_arrow},
    types::{ChangeClass, TrendArrow},
};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Stable identity of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelKind {
    MonitoredTokens,
    MajorAssets,
    TopAssets,
    TrendingAssets,
}

impl PanelKind {
    /// All panels in display order
    pub fn all() -> &'static [PanelKind] {
        &[
            PanelKind::MonitoredTokens,
            PanelKind::MajorAssets,
            PanelKind::TopAssets,
            PanelKind::TrendingAssets,
        ]
    }

    /// Logical name of the panel's content area
    pub fn name(&self) -> &'static str {
        match self {
            PanelKind::MonitoredTokens => "monitored-tokens",
            PanelKind::MajorAssets => "major-cryptos",
            PanelKind::TopAssets => "top-cryptos",
            PanelKind::TrendingAssets => "trending-cryptos",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PanelKind::MonitoredTokens => "PRIORITY TARGETS",
            PanelKind::MajorAssets => "MAJOR ASSETS",
            PanelKind::TopAssets => "TOP ASSETS BY MARKET CAP",
            PanelKind::TrendingAssets => "TRENDING",
        }
    }

    /// Placeholder shown when the panel's request failed
    pub fn error_message(&self) -> &'static str {
        match self {
            PanelKind::MonitoredTokens => "SURVEILLANCE SYSTEM ERROR",
            PanelKind::MajorAssets => "MAJOR ASSETS SCAN FAILED",
            PanelKind::TopAssets => "TOP ASSETS SCAN FAILED",
            PanelKind::TrendingAssets => "TREND DETECTION FAILED",
        }
    }

    /// Placeholder shown when the request returned nothing usable
    pub fn empty_message(&self) -> &'static str {
        match self {
            PanelKind::MonitoredTokens => "NO TARGET DATA AVAILABLE",
            PanelKind::MajorAssets => "MAJOR ASSETS DATA UNAVAILABLE",
            PanelKind::TopAssets => "TOP ASSETS DATA UNAVAILABLE",
            PanelKind::TrendingAssets => "TRENDING DATA UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for PanelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A formatted 24h change: value, colour class, arrow and text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeDisplay {
    pub value: f64,
    pub class: ChangeClass,
    pub arrow: TrendArrow,
    /// Arrow followed by the percentage, e.g. `↘ -1.00%`
    pub text: String,
}

impl ChangeDisplay {
    pub fn new(delta: f64) -> Self {
        let arrow = trend_arrow(delta);
        Self {
            value: delta,
            class: change_class(delta),
            arrow,
            text: format!("{} {}", arrow, format_percent_change(delta)),
        }
    }
}

/// Marker shown in the status field of an available token card
pub const ACTIVE_MARKER: &str = "ACTIVE";

/// Marker shown instead of stats on a token card with no data
pub const UNAVAILABLE_MARKER: &str = "TARGET NOT AVAILABLE";

/// Marker shown on every trending row
pub const TRENDING_MARKER: &str = "TRENDING";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenStats {
    pub price: String,
    pub change: ChangeDisplay,
    pub volume: String,
    pub market_cap: String,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CardBody {
    Available(TokenStats),
    Unavailable { marker: &'static str },
}

/// Card of the monitored-tokens panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenCard {
    pub name: String,
    pub id: String,
    pub body: CardBody,
}

impl TokenCard {
    pub fn is_available(&self) -> bool {
        matches!(self.body, CardBody::Available(_))
    }
}

/// Compact row of the major-assets panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetRow {
    pub name: String,
    pub id: String,
    pub price: String,
    pub change: ChangeDisplay,
}

/// Ranked row of the top-assets and trending panels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    /// 1-based rank
    pub rank: usize,
    pub name: String,
    pub symbol: String,
    pub price: Option<String>,
    pub marker: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderKind {
    Empty,
    Error,
}

/// Content of one panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "items", rename_all = "snake_case")]
pub enum PanelBody {
    TokenCards(Vec<TokenCard>),
    AssetRows(Vec<AssetRow>),
    RankedRows(Vec<RankedRow>),
    Placeholder {
        kind: PlaceholderKind,
        message: String,
    },
}

impl PanelBody {
    pub fn placeholder(kind: PlaceholderKind, message: &str) -> Self {
        PanelBody::Placeholder {
            kind,
            message: message.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            PanelBody::Placeholder {
                kind: PlaceholderKind::Error,
                ..
            }
        )
    }
}

/// Result of rendering one panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelUpdate {
    pub kind: PanelKind,
    pub body: PanelBody,
    /// Error raised by the underlying call, if any
    pub error: Option<String>,
}

impl PanelUpdate {
    pub fn loaded(kind: PanelKind, body: PanelBody) -> Self {
        Self {
            kind,
            body,
            error: None,
        }
    }

    pub fn empty(kind: PanelKind) -> Self {
        Self::loaded(
            kind,
            PanelBody::placeholder(PlaceholderKind::Empty, kind.empty_message()),
        )
    }

    pub fn failed(kind: PanelKind, error: &ApiError) -> Self {
        Self {
            kind,
            body: PanelBody::placeholder(PlaceholderKind::Error, kind.error_message()),
            error: Some(error.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Trait for panel renderers
#[async_trait]
pub trait PanelRenderer: Send + Sync {
    /// Which panel this renderer fills
    fn kind(&self) -> PanelKind;

    /// Fetches the panel's data and builds its content
    ///
    /// Returns `ApiError::EmptyResult` when the response had nothing to show.
    async fn load(&self, api: &CoinGeckoClient) -> Result<PanelBody, ApiError>;

    /// Loads the panel, turning any error into a panel-scoped placeholder
    async fn render(&self, api: &CoinGeckoClient) -> PanelUpdate {
        let kind = self.kind();

        match self.load(api).await {
            Ok(body) => PanelUpdate::loaded(kind, body),
            Err(e) if e.is_empty_result() => {
                tracing::info!(panel = kind.name(), "Panel returned no data");
                PanelUpdate::empty(kind)
            }
            Err(e) => {
                tracing::warn!(panel = kind.name(), error = %e, "Failed to load panel");
                PanelUpdate::failed(kind, &e)
            }
        }
    }
}

/// Builds the four standard renderers in display order
pub fn default_panels(config: &TrackerConfig) -> Vec<Arc<dyn PanelRenderer>> {
    vec![
        Arc::new(MonitoredTokensPanel::new(
            config.watched_tokens.clone(),
            &config.vs_currency,
        )),
        Arc::new(MajorAssetsPanel::new(
            config.reference_assets.clone(),
            config.watched_tokens.clone(),
            &config.vs_currency,
        )),
        Arc::new(TopAssetsPanel::new(&config.vs_currency, config.top_assets_limit)),
        Arc::new(TrendingPanel::new(config.trending_limit)),
    ]
}
