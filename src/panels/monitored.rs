//! Monitored-tokens panel: one detailed card per watched token

use crate::{
    client::CoinGeckoClient,
    error::ApiError,
    formatter::{format_large_number, format_price},
    panels::{
        CardBody, ChangeDisplay, PanelBody, PanelKind, PanelRenderer, TokenCard, TokenStats,
        ACTIVE_MARKER, UNAVAILABLE_MARKER,
    },
    types::{PriceSnapshot, WatchedToken},
};
use async_trait::async_trait;

pub struct MonitoredTokensPanel {
    tokens: Vec<WatchedToken>,
    vs_currency: String,
}

impl MonitoredTokensPanel {
    pub fn new(tokens: Vec<WatchedToken>, vs_currency: &str) -> Self {
        Self {
            tokens,
            vs_currency: vs_currency.to_string(),
        }
    }

    /// Builds one card per watched token, in watch-list order
    ///
    /// Tokens missing from the snapshot get an unavailable card rather than
    /// being dropped.
    pub fn build_cards(&self, snapshot: &PriceSnapshot) -> Vec<TokenCard> {
        self.tokens
            .iter()
            .map(|token| {
                let body = match snapshot.quote(&token.id, &self.vs_currency) {
                    Some(quote) => CardBody::Available(TokenStats {
                        price: format_price(quote.price),
                        change: ChangeDisplay::new(quote.change_24h.unwrap_or(0.0)),
                        volume: format_large_number(quote.volume_24h.unwrap_or(0.0)),
                        market_cap: format_large_number(quote.market_cap.unwrap_or(0.0)),
                        status: ACTIVE_MARKER,
                    }),
                    None => CardBody::Unavailable {
                        marker: UNAVAILABLE_MARKER,
                    },
                };

                TokenCard {
                    name: token.display_name.clone(),
                    id: token.id.clone(),
                    body,
                }
            })
            .collect()
    }
}

#[async_trait]
impl PanelRenderer for MonitoredTokensPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::MonitoredTokens
    }

    async fn load(&self, api: &CoinGeckoClient) -> Result<PanelBody, ApiError> {
        let ids: Vec<&str> = self.tokens.iter().map(|t| t.id.as_str()).collect();
        let snapshot = api
            .fetch_simple_price(&ids, &[self.vs_currency.as_str()])
            .await?;

        if snapshot.is_empty() {
            return Err(ApiError::EmptyResult("monitored tokens"));
        }

        Ok(PanelBody::TokenCards(self.build_cards(&snapshot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;
    use std::sync::Arc;

    fn panel() -> MonitoredTokensPanel {
        MonitoredTokensPanel::new(
            vec![
                WatchedToken::new("berachain-bera", "BERA"),
                WatchedToken::new("hyperliquid", "HYPE"),
            ],
            "usd",
        )
    }

    fn api(mock: &Arc<MockTransport>) -> CoinGeckoClient {
        CoinGeckoClient::with_transport("https://api.test/api/v3", mock.clone())
    }

    #[tokio::test]
    async fn test_missing_token_gets_unavailable_card_in_order() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            "/simple/price",
            r#"{"hyperliquid":{"usd":38.123,"usd_24h_change":-1.0,"usd_24h_vol":1.5e9,"usd_market_cap":2.3e12}}"#,
        );

        let update = panel().render(&api(&mock)).await;
        assert!(!update.is_failed());

        let cards = match update.body {
            PanelBody::TokenCards(cards) => cards,
            other => panic!("unexpected body: {:?}", other),
        };
        assert_eq!(cards.len(), 2);

        assert_eq!(cards[0].id, "berachain-bera");
        assert_eq!(cards[0].name, "BERA");
        assert_eq!(
            cards[0].body,
            CardBody::Unavailable {
                marker: UNAVAILABLE_MARKER
            }
        );

        assert_eq!(cards[1].name, "HYPE");
        match &cards[1].body {
            CardBody::Available(stats) => {
                assert_eq!(stats.price, "$38.12");
                assert_eq!(stats.change.text, "↘ -1.00%");
                assert_eq!(stats.volume, "$1.5B");
                assert_eq!(stats.market_cap, "$2.3T");
                assert_eq!(stats.status, ACTIVE_MARKER);
            }
            other => panic!("expected stats, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_secondary_fields_default_to_zero() {
        let mock = Arc::new(MockTransport::new());
        mock.respond("/simple/price", r#"{"berachain-bera":{"usd":0.5}}"#);

        let cards = panel().build_cards(
            &api(&mock)
                .fetch_simple_price(&["berachain-bera"], &["usd"])
                .await
                .unwrap(),
        );

        match &cards[0].body {
            CardBody::Available(stats) => {
                assert_eq!(stats.price, "$0.500000");
                assert_eq!(stats.change.text, "→ 0.00%");
                assert_eq!(stats.volume, "$0");
            }
            other => panic!("expected stats, got {:?}", other),
        }
        assert!(!cards[1].is_available());
    }

    #[tokio::test]
    async fn test_empty_snapshot_shows_no_data_placeholder() {
        let mock = Arc::new(MockTransport::new());
        mock.respond("/simple/price", "{}");

        let update = panel().render(&api(&mock)).await;

        assert!(!update.is_failed());
        assert_eq!(
            update.body,
            PanelBody::placeholder(
                crate::panels::PlaceholderKind::Empty,
                "NO TARGET DATA AVAILABLE"
            )
        );
    }

    #[tokio::test]
    async fn test_request_error_shows_error_placeholder() {
        let mock = Arc::new(MockTransport::new());
        mock.fail_status("/simple/price", 500);

        let update = panel().render(&api(&mock)).await;

        assert!(update.is_failed());
        assert!(update.body.is_error());
    }
}
