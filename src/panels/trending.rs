//! Trending panel: the first N trending assets

use crate::{
    client::CoinGeckoClient,
    error::ApiError,
    panels::{PanelBody, PanelKind, PanelRenderer, RankedRow, TRENDING_MARKER},
    types::TrendingEntry,
};
use async_trait::async_trait;

pub struct TrendingPanel {
    limit: usize,
}

impl TrendingPanel {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn build_rows(&self, entries: &[TrendingEntry]) -> Vec<RankedRow> {
        entries
            .iter()
            .take(self.limit)
            .enumerate()
            .map(|(i, entry)| RankedRow {
                rank: i + 1,
                name: entry.name.clone(),
                symbol: entry.symbol.clone(),
                price: None,
                marker: Some(TRENDING_MARKER),
            })
            .collect()
    }
}

#[async_trait]
impl PanelRenderer for TrendingPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::TrendingAssets
    }

    async fn load(&self, api: &CoinGeckoClient) -> Result<PanelBody, ApiError> {
        let entries = api.fetch_trending().await?;

        if entries.is_empty() {
            return Err(ApiError::EmptyResult("trending"));
        }

        Ok(PanelBody::RankedRows(self.build_rows(&entries)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_takes_first_five() {
        let items: Vec<String> = (1..=7)
            .map(|n| {
                format!(
                    r#"{{"item":{{"id":"t{n}","name":"Trend {n}","symbol":"T{n}","score":{}}}}}"#,
                    n - 1
                )
            })
            .collect();
        let body = format!(r#"{{"coins":[{}]}}"#, items.join(","));

        let mock = Arc::new(MockTransport::new());
        mock.respond("/search/trending", &body);
        let api = CoinGeckoClient::with_transport("https://api.test/api/v3", mock.clone());

        let update = TrendingPanel::new(5).render(&api).await;

        let rows = match update.body {
            PanelBody::RankedRows(rows) => rows,
            other => panic!("unexpected body: {:?}", other),
        };
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].name, "Trend 1");
        assert_eq!(rows[4].symbol, "T5");
        assert!(rows
            .iter()
            .all(|r| r.marker == Some(TRENDING_MARKER) && r.price.is_none()));
    }

    #[tokio::test]
    async fn test_missing_coins_field_is_empty() {
        let mock = Arc::new(MockTransport::new());
        mock.respond("/search/trending", r#"{"nfts":[]}"#);
        let api = CoinGeckoClient::with_transport("https://api.test/api/v3", mock.clone());

        let update = TrendingPanel::new(5).render(&api).await;

        assert!(!update.is_failed());
        assert!(matches!(update.body, PanelBody::Placeholder { .. }));
    }
}
