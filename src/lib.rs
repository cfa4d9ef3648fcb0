//! # Crypto Terminal
//!
//! Polls the public CoinGecko API and keeps four price panels up to date:
//! monitored tokens, major assets, top assets by market cap and trending
//! assets. Requests that fail directly are retried once through a public
//! relay. Panels refresh on a 30 second timer that can be toggled,
//! paused while the display is hidden, or bypassed with a manual refresh.
//!
//! ## Usage
//!
//! ```no_run
//! use crypto_terminal::{view, RefreshController, TrackerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = RefreshController::new(&TrackerConfig::default())?;
//!
//! // First load, then the auto-refresh timer is armed
//! let report = controller.start().await;
//! println!("{}", report.status);
//!
//! let board = controller.board();
//! println!("{}", view::render_board(&board.snapshot().await));
//!
//! controller.shutdown().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Errors never cross a panel boundary. A failed request turns into an
//! error placeholder for that panel only, and the status line reports a
//! partial failure:
//!
//! ```no_run
//! use crypto_terminal::{CoinGeckoClient, ApiError, TrackerConfig};
//!
//! # async fn example() -> Result<(), ApiError> {
//! let api = CoinGeckoClient::from_config(&TrackerConfig::default())?;
//!
//! match api.fetch_trending().await {
//!     Ok(entries) => println!("{} trending", entries.len()),
//!     Err(ApiError::Http { status, .. }) => println!("HTTP {}", status),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod client;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod formatter;
pub mod panels;
pub mod transport;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use board::{Board, BoardEvent, BoardSnapshot};
pub use client::CoinGeckoClient;
pub use config::TrackerConfig;
pub use controller::{CycleReport, RefreshController, RefreshCycle};
pub use error::ApiError;
pub use panels::{PanelBody, PanelKind, PanelRenderer, PanelUpdate};
pub use transport::{HttpTransport, RelayTransport, Transport};
pub use types::{
    ChangeClass, CoinInfo, MarketListingEntry, PriceSnapshot, RefreshStatus, TokenQuote,
    TrendArrow, TrendingEntry, Visibility, WatchedToken,
};
