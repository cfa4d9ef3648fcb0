//! Plain-text rendering of the board for terminals

use crate::{
    board::{BoardSnapshot, ControlState, PanelSlot},
    panels::{CardBody, PanelBody, PanelKind},
};
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

/// Renders the whole board: header, controls, then every panel in order
pub fn render_board(board: &BoardSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "[{}]  {}", board.clock, board.status);
    let _ = writeln!(
        out,
        "{}  {}",
        render_control(&board.refresh_control),
        render_control(&board.auto_control)
    );

    for kind in PanelKind::all() {
        out.push('\n');
        out.push_str(&render_panel(*kind, board.panels.get(kind)));
    }

    out
}

/// Renders one panel; a panel that was never loaded shows a loading line
pub fn render_panel(kind: PanelKind, slot: Option<&PanelSlot>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", kind.title());

    let slot = match slot {
        Some(slot) => slot,
        None => {
            let _ = writeln!(out, "  LOADING...");
            return out;
        }
    };

    match &slot.body {
        PanelBody::TokenCards(cards) => {
            for card in cards {
                let _ = writeln!(out, "{} ({})", card.name, card.id);
                match &card.body {
                    CardBody::Available(stats) => {
                        let _ = writeln!(out, "  {:<12}{}", "Price", stats.price);
                        let _ = writeln!(
                            out,
                            "  {:<12}{} [{}]",
                            "24h Change",
                            stats.change.text,
                            stats.change.class.as_str()
                        );
                        let _ = writeln!(out, "  {:<12}{}", "24h Volume", stats.volume);
                        let _ = writeln!(out, "  {:<12}{}", "Market Cap", stats.market_cap);
                        let _ = writeln!(out, "  {:<12}{}", "Status", stats.status);
                    }
                    CardBody::Unavailable { marker } => {
                        let _ = writeln!(out, "  {}", marker);
                    }
                }
            }
        }
        PanelBody::AssetRows(rows) => {
            for row in rows {
                let _ = writeln!(
                    out,
                    "{:<10} {:<16} {:>18} {:>12}",
                    row.name, row.id, row.price, row.change.text
                );
            }
        }
        PanelBody::RankedRows(rows) => {
            for row in rows {
                let tail = row.price.as_deref().or(row.marker).unwrap_or_default();
                let _ = writeln!(
                    out,
                    "{:>2}. {:<24} {:<8} {:>16}",
                    row.rank, row.name, row.symbol, tail
                );
            }
        }
        PanelBody::Placeholder { message, .. } => {
            let _ = writeln!(out, "  !! {}", message);
        }
    }

    out
}

fn render_control(control: &ControlState) -> String {
    if control.enabled {
        format!("[ {} ]", control.label)
    } else {
        format!("( {} )", control.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::panels::{
        ChangeDisplay, PanelUpdate, RankedRow, TokenCard, TokenStats, TRENDING_MARKER,
        UNAVAILABLE_MARKER,
    };
    use crate::types::RefreshStatus;

    #[tokio::test]
    async fn test_render_board() {
        let board = Board::new();
        board.set_clock("2026-10-16 09:30:00".to_string()).await;
        board.set_status(RefreshStatus::AllOperational).await;
        board
            .apply(PanelUpdate::loaded(
                PanelKind::MonitoredTokens,
                PanelBody::TokenCards(vec![
                    TokenCard {
                        name: "HYPE".to_string(),
                        id: "hyperliquid".to_string(),
                        body: CardBody::Available(TokenStats {
                            price: "$38.12".to_string(),
                            change: ChangeDisplay::new(2.5),
                            volume: "$1.5B".to_string(),
                            market_cap: "$12.8B".to_string(),
                            status: "ACTIVE",
                        }),
                    },
                    TokenCard {
                        name: "BERA".to_string(),
                        id: "berachain-bera".to_string(),
                        body: CardBody::Unavailable {
                            marker: UNAVAILABLE_MARKER,
                        },
                    },
                ]),
            ))
            .await;
        board
            .apply(PanelUpdate::loaded(
                PanelKind::TrendingAssets,
                PanelBody::RankedRows(vec![RankedRow {
                    rank: 1,
                    name: "Pepe".to_string(),
                    symbol: "PEPE".to_string(),
                    price: None,
                    marker: Some(TRENDING_MARKER),
                }]),
            ))
            .await;
        board.apply(PanelUpdate::empty(PanelKind::TopAssets)).await;

        let text = render_board(&board.snapshot().await);

        assert!(text.contains("[2026-10-16 09:30:00]  SURVEILLANCE ACTIVE - ALL SYSTEMS OPERATIONAL"));
        assert!(text.contains("[ REFRESH ]  [ DISABLE AUTO ]"));
        assert!(text.contains("HYPE (hyperliquid)"));
        assert!(text.contains("↗ 2.50% [change-positive]"));
        assert!(text.contains("TARGET NOT AVAILABLE"));
        assert!(text.contains("!! TOP ASSETS DATA UNAVAILABLE"));
        assert!(text.contains("TRENDING"));

        let major = text.split("== MAJOR ASSETS ==").nth(1).unwrap();
        assert!(major.trim_start().starts_with("LOADING..."));
    }

    #[test]
    fn test_disabled_control() {
        let control = ControlState {
            label: "REFRESHING...",
            enabled: false,
        };
        assert_eq!(render_control(&control), "( REFRESHING... )");
    }
}
