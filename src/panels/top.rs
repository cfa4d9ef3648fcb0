//! Top-assets panel: the first N assets by market cap

use crate::{
    client::CoinGeckoClient,
    error::ApiError,
    formatter::format_price,
    panels::{PanelBody, PanelKind, PanelRenderer, RankedRow},
    types::MarketListingEntry,
};
use async_trait::async_trait;

pub struct TopAssetsPanel {
    vs_currency: String,
    limit: usize,
}

impl TopAssetsPanel {
    pub fn new(vs_currency: &str, limit: usize) -> Self {
        Self {
            vs_currency: vs_currency.to_string(),
            limit,
        }
    }

    pub fn build_rows(&self, listing: &[MarketListingEntry]) -> Vec<RankedRow> {
        listing
            .iter()
            .take(self.limit)
            .enumerate()
            .map(|(i, entry)| RankedRow {
                rank: i + 1,
                name: entry.name.clone(),
                symbol: entry.symbol.to_uppercase(),
                price: Some(format_price(entry.current_price.unwrap_or(0.0))),
                marker: None,
            })
            .collect()
    }
}

#[async_trait]
impl PanelRenderer for TopAssetsPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::TopAssets
    }

    async fn load(&self, api: &CoinGeckoClient) -> Result<PanelBody, ApiError> {
        let listing = api
            .fetch_market_listing(&self.vs_currency, self.limit)
            .await?;

        if listing.is_empty() {
            return Err(ApiError::EmptyResult("top assets"));
        }

        Ok(PanelBody::RankedRows(self.build_rows(&listing)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::PlaceholderKind;
    use crate::transport::mock::MockTransport;
    use std::sync::Arc;

    fn api(mock: &Arc<MockTransport>) -> CoinGeckoClient {
        CoinGeckoClient::with_transport("https://api.test/api/v3", mock.clone())
    }

    #[tokio::test]
    async fn test_ranked_rows() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            "/coins/markets",
            r#"[{"id":"bitcoin","symbol":"btc","name":"Bitcoin","current_price":64000.0},
                {"id":"ethereum","symbol":"eth","name":"Ethereum","current_price":3100.5},
                {"id":"tether","symbol":"usdt","name":"Tether","current_price":0.9998}]"#,
        );

        let update = TopAssetsPanel::new("usd", 5).render(&api(&mock)).await;

        let rows = match update.body {
            PanelBody::RankedRows(rows) => rows,
            other => panic!("unexpected body: {:?}", other),
        };
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].symbol, "BTC");
        assert_eq!(rows[0].price.as_deref(), Some("$64,000.00"));
        assert_eq!(rows[2].rank, 3);
        assert_eq!(rows[2].price.as_deref(), Some("$0.999800"));
        assert!(rows.iter().all(|r| r.marker.is_none()));
    }

    #[test]
    fn test_rows_are_capped() {
        let entry = |n: usize| MarketListingEntry {
            id: format!("coin-{}", n),
            symbol: format!("c{}", n),
            name: format!("Coin {}", n),
            current_price: None,
            market_cap: None,
            market_cap_rank: None,
        };
        let listing: Vec<_> = (0..8).map(entry).collect();

        let rows = TopAssetsPanel::new("usd", 5).build_rows(&listing);

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4].name, "Coin 4");
        assert_eq!(rows[0].price.as_deref(), Some("$0.00000000"));
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let mock = Arc::new(MockTransport::new());
        mock.respond("/coins/markets", "[]");

        let update = TopAssetsPanel::new("usd", 5).render(&api(&mock)).await;

        assert_eq!(
            update.body,
            PanelBody::placeholder(PlaceholderKind::Empty, "TOP ASSETS DATA UNAVAILABLE")
        );
    }
}
