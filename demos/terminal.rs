use crypto_terminal::formatter::{format_large_number, format_price};
use crypto_terminal::{
    view, BoardEvent, CoinGeckoClient, RefreshController, RefreshStatus, TrackerConfig, Visibility,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn print_coin_info(api: &CoinGeckoClient, id: &str, currency: &str) {
    let info = match api.fetch_coin_info(id).await {
        Ok(info) => info,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    let price = info.price_in(currency).unwrap_or(0.0);
    let market_cap = info.market_cap_in(currency).unwrap_or(0.0);
    let volume = info.volume_in(currency).unwrap_or(0.0);

    println!(
        "{} ({}) rank {:?}",
        info.name,
        info.symbol.to_uppercase(),
        info.market_cap_rank
    );
    println!("  Price:      {}", format_price(price));
    println!("  Market Cap: {}", format_large_number(market_cap));
    println!("  Volume 24h: {}", format_large_number(volume));
    println!("  24h:        {:.2}%", info.change_24h().unwrap_or(0.0));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    println!("Crypto Terminal");
    println!("===============");
    println!("Commands: r = refresh, a = toggle auto, h/s = hide/show");
    println!("          i <id> = coin info, q = quit");

    let config = TrackerConfig::default();
    let controller = Arc::new(RefreshController::new(&config)?);
    let api = controller.api();
    let board = controller.board();

    // Redraw whenever a cycle settles
    let mut events = board.subscribe();
    let redraw_board = board.clone();
    let redraw = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(BoardEvent::StatusChanged(
                    RefreshStatus::AllOperational | RefreshStatus::PartialFailure,
                ))
                | Ok(BoardEvent::ControlsChanged) => {
                    println!("{}", view::render_board(&redraw_board.snapshot().await));
                }
                Ok(_) => {}
                Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => {}
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    controller.start().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("r") => {
                if controller.manual_refresh().await.is_none() {
                    println!("Refresh already running");
                }
            }
            Some("a") => {
                let enabled = controller.toggle_auto_refresh().await;
                println!("Auto refresh {}", if enabled { "enabled" } else { "disabled" });
            }
            Some("h") => controller.set_visibility(Visibility::Hidden).await,
            Some("s") => controller.set_visibility(Visibility::Visible).await,
            Some("i") => match parts.next() {
                Some(id) => print_coin_info(&api, id, &config.vs_currency).await,
                None => println!("Usage: i <coin id>"),
            },
            Some("q") => break,
            Some(other) => println!("Unknown command: {}", other),
            None => {}
        }
    }

    controller.shutdown().await;
    redraw.abort();

    Ok(())
}
