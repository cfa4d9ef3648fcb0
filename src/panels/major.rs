//! Major-assets panel: compact rows for reference assets plus the watch list

use crate::{
    client::CoinGeckoClient,
    error::ApiError,
    formatter::format_price,
    panels::{AssetRow, ChangeDisplay, PanelBody, PanelKind, PanelRenderer},
    types::{display_name_for, PriceSnapshot, WatchedToken},
};
use async_trait::async_trait;

pub struct MajorAssetsPanel {
    reference_assets: Vec<String>,
    tokens: Vec<WatchedToken>,
    vs_currency: String,
}

impl MajorAssetsPanel {
    pub fn new(
        reference_assets: Vec<String>,
        tokens: Vec<WatchedToken>,
        vs_currency: &str,
    ) -> Self {
        Self {
            reference_assets,
            tokens,
            vs_currency: vs_currency.to_string(),
        }
    }

    /// Reference assets first, then watched tokens
    pub fn asset_ids(&self) -> Vec<&str> {
        self.reference_assets
            .iter()
            .map(String::as_str)
            .chain(self.tokens.iter().map(|t| t.id.as_str()))
            .collect()
    }

    /// Builds rows for assets present in the snapshot; absent ones are skipped
    pub fn build_rows(&self, snapshot: &PriceSnapshot) -> Vec<AssetRow> {
        self.asset_ids()
            .into_iter()
            .filter_map(|id| {
                let quote = snapshot.quote(id, &self.vs_currency)?;
                Some(AssetRow {
                    name: display_name_for(&self.tokens, id),
                    id: id.to_string(),
                    price: format_price(quote.price),
                    change: ChangeDisplay::new(quote.change_24h.unwrap_or(0.0)),
                })
            })
            .collect()
    }
}

#[async_trait]
impl PanelRenderer for MajorAssetsPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::MajorAssets
    }

    async fn load(&self, api: &CoinGeckoClient) -> Result<PanelBody, ApiError> {
        let snapshot = api
            .fetch_simple_price(&self.asset_ids(), &[self.vs_currency.as_str()])
            .await?;

        if snapshot.is_empty() {
            return Err(ApiError::EmptyResult("major assets"));
        }

        Ok(PanelBody::AssetRows(self.build_rows(&snapshot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;
    use std::sync::Arc;

    fn panel() -> MajorAssetsPanel {
        MajorAssetsPanel::new(
            vec!["bitcoin".to_string(), "ethereum".to_string()],
            vec![
                WatchedToken::new("berachain-bera", "BERA"),
                WatchedToken::new("hyperliquid", "HYPE"),
            ],
            "usd",
        )
    }

    #[test]
    fn test_asset_ids_order() {
        assert_eq!(
            panel().asset_ids(),
            vec!["bitcoin", "ethereum", "berachain-bera", "hyperliquid"]
        );
    }

    #[tokio::test]
    async fn test_absent_assets_are_silently_skipped() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            "/simple/price",
            r#"{"hyperliquid":{"usd":40.0,"usd_24h_change":3.25},
                "bitcoin":{"usd":64000.0,"usd_24h_change":-0.5}}"#,
        );
        let api = CoinGeckoClient::with_transport("https://api.test/api/v3", mock.clone());

        let update = panel().render(&api).await;

        let rows = match update.body {
            PanelBody::AssetRows(rows) => rows,
            other => panic!("unexpected body: {:?}", other),
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "BITCOIN");
        assert_eq!(rows[0].price, "$64,000.00");
        assert_eq!(rows[0].change.text, "↘ -0.50%");
        assert_eq!(rows[1].name, "HYPE");
        assert_eq!(rows[1].id, "hyperliquid");
        assert_eq!(rows[1].change.text, "↗ 3.25%");
    }

    #[tokio::test]
    async fn test_transport_failure_is_panel_scoped() {
        let mock = Arc::new(MockTransport::new());
        mock.fail_network("/simple/price");
        let api = CoinGeckoClient::with_transport("https://api.test/api/v3", mock.clone());

        let update = panel().render(&api).await;

        assert!(update.is_failed());
        assert_eq!(update.kind, PanelKind::MajorAssets);
        assert!(update.body.is_error());
    }
}
