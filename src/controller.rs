//! Refresh controller
//!
//! Owns the periodic auto-refresh timer, the clock ticker and the manual
//! refresh trigger for one terminal session.
//!
//! ```text
//! RefreshController
//!     ↓ (timer every 30s / manual trigger)
//! RefreshCycle::run
//!     ↓ fan-out, join on all four
//! PanelRenderer::render (each catches its own errors)
//!     ↓
//! Board (one slot per panel, status line)
//! ```

use crate::{
    board::Board,
    client::CoinGeckoClient,
    config::TrackerConfig,
    constants::MIN_INTERVAL_SECS,
    error::ApiError,
    formatter::format_clock,
    panels::{default_panels, PanelKind, PanelRenderer, PanelUpdate},
    types::{RefreshStatus, Visibility},
};
use chrono::Local;
use futures::future::join_all;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, interval_at, Instant, MissedTickBehavior};
use uuid::Uuid;

/// Outcome of one refresh cycle
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub id: Uuid,
    pub status: RefreshStatus,
    /// Panels whose underlying call raised, in display order
    pub failed: Vec<PanelKind>,
    pub elapsed: Duration,
}

/// One coordinated load of every panel
///
/// Cheap to clone; the timer task holds its own copy.
#[derive(Clone)]
pub struct RefreshCycle {
    api: Arc<CoinGeckoClient>,
    board: Arc<Board>,
    panels: Arc<Vec<Arc<dyn PanelRenderer>>>,
}

impl RefreshCycle {
    pub fn new(
        api: Arc<CoinGeckoClient>,
        board: Arc<Board>,
        panels: Vec<Arc<dyn PanelRenderer>>,
    ) -> Self {
        Self {
            api,
            board,
            panels: Arc::new(panels),
        }
    }

    /// Runs every panel concurrently and waits for all of them to settle
    ///
    /// Each panel writes its own slot as soon as it finishes. The status line
    /// shows partial failure if any panel's call raised.
    pub async fn run(&self) -> CycleReport {
        let id = Uuid::new_v4();
        let start = Instant::now();

        tracing::info!(cycle_id = %id, panels = self.panels.len(), "Loading all panels");
        self.board.set_status(RefreshStatus::InProgress).await;

        let outcomes = join_all(self.panels.iter().map(|panel| self.run_panel(id, panel))).await;

        let failed: Vec<PanelKind> = outcomes
            .into_iter()
            .filter_map(|(kind, failed)| failed.then_some(kind))
            .collect();

        let status = if failed.is_empty() {
            RefreshStatus::AllOperational
        } else {
            RefreshStatus::PartialFailure
        };
        self.board.set_status(status).await;

        let elapsed = start.elapsed();
        if failed.is_empty() {
            tracing::info!(
                cycle_id = %id,
                latency_ms = elapsed.as_millis() as u64,
                "All panels loaded"
            );
        } else {
            tracing::warn!(
                cycle_id = %id,
                failed = failed.len(),
                latency_ms = elapsed.as_millis() as u64,
                "Refresh finished with failed panels"
            );
        }

        CycleReport {
            id,
            status,
            failed,
            elapsed,
        }
    }

    async fn run_panel(&self, cycle_id: Uuid, panel: &Arc<dyn PanelRenderer>) -> (PanelKind, bool) {
        let kind = panel.kind();

        let update = match AssertUnwindSafe(panel.render(&self.api)).catch_unwind().await {
            Ok(update) => update,
            Err(_) => {
                tracing::error!(
                    cycle_id = %cycle_id,
                    panel = kind.name(),
                    "Panel renderer panicked"
                );
                PanelUpdate::failed(kind, &ApiError::Client("panel renderer panicked".to_string()))
            }
        };

        let failed = update.is_failed();
        self.board.apply(update).await;

        (kind, failed)
    }
}

struct RefreshState {
    auto_refresh: bool,
    visibility: Visibility,
    timer: Option<JoinHandle<()>>,
}

/// Session controller: auto refresh toggle, manual refresh, visibility
pub struct RefreshController {
    cycle: RefreshCycle,
    board: Arc<Board>,
    refresh_interval: Duration,
    clock_interval: Duration,
    state: Mutex<RefreshState>,
    clock: Mutex<Option<JoinHandle<()>>>,
    manual_in_flight: Arc<AtomicBool>,
}

impl RefreshController {
    /// Creates a controller with a live API client and the standard panels
    pub fn new(config: &TrackerConfig) -> Result<Self, ApiError> {
        let api = Arc::new(CoinGeckoClient::from_config(config)?);
        tracing::info!(
            transport = api.transport_name(),
            refresh_interval_secs = config.refresh_interval.as_secs(),
            "Creating refresh controller"
        );

        Ok(Self::with_parts(
            config,
            api,
            default_panels(config),
            Board::new(),
        ))
    }

    /// Creates a controller from prebuilt parts
    ///
    /// This is primarily for testing with mock transports. The board's auto
    /// refresh label is set from `config`. Intervals shorter than
    /// [`MIN_INTERVAL_SECS`] are raised to it.
    pub fn with_parts(
        config: &TrackerConfig,
        api: Arc<CoinGeckoClient>,
        panels: Vec<Arc<dyn PanelRenderer>>,
        board: Board,
    ) -> Self {
        let board = Arc::new(board.with_auto_refresh(config.auto_refresh));
        let floor = Duration::from_secs(MIN_INTERVAL_SECS);

        Self {
            cycle: RefreshCycle::new(api, board.clone(), panels),
            board,
            refresh_interval: config.refresh_interval.max(floor),
            clock_interval: config.clock_interval.max(floor),
            state: Mutex::new(RefreshState {
                auto_refresh: config.auto_refresh,
                visibility: Visibility::Visible,
                timer: None,
            }),
            clock: Mutex::new(None),
            manual_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn board(&self) -> Arc<Board> {
        self.board.clone()
    }

    /// Shared API client, for one-off lookups outside the refresh cycle
    pub fn api(&self) -> Arc<CoinGeckoClient> {
        self.cycle.api.clone()
    }

    /// Starts the session: clock, first full load, then the timer
    pub async fn start(&self) -> CycleReport {
        self.board.set_clock(format_clock(&Local::now())).await;
        self.start_clock().await;

        let auto_refresh = self.state.lock().await.auto_refresh;
        self.board.set_auto_refresh(auto_refresh).await;

        let report = self.cycle.run().await;
        self.start_auto_refresh().await;

        report
    }

    /// Runs one full refresh cycle now
    pub async fn refresh_all(&self) -> CycleReport {
        self.cycle.run().await
    }

    /// Runs a refresh cycle on user request, independent of the timer
    ///
    /// The refresh control is disabled while the cycle runs. A request made
    /// while another manual refresh is in flight is rejected with `None`.
    ///
    /// The cycle runs in its own task. Dropping the returned future stops
    /// the wait, not the cycle; the control is released when it settles.
    pub async fn manual_refresh(&self) -> Option<CycleReport> {
        if self
            .manual_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Manual refresh already running, ignoring trigger");
            return None;
        }

        let cycle = self.cycle.clone();
        let board = self.board.clone();
        let in_flight = self.manual_in_flight.clone();

        let task = tokio::spawn(async move {
            board.set_refresh_busy(true).await;
            let report = cycle.run().await;
            board.set_refresh_busy(false).await;
            in_flight.store(false, Ordering::Release);
            report
        });

        match task.await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::error!(error = %e, "Manual refresh task failed");
                self.board.set_refresh_busy(false).await;
                self.manual_in_flight.store(false, Ordering::Release);
                None
            }
        }
    }

    /// Flips auto refresh, starting or cancelling the timer
    ///
    /// # Returns
    /// The new auto refresh state
    pub async fn toggle_auto_refresh(&self) -> bool {
        let enabled = {
            let mut state = self.state.lock().await;
            state.auto_refresh = !state.auto_refresh;
            state.auto_refresh
        };

        tracing::info!(enabled, "Auto refresh toggled");
        self.board.set_auto_refresh(enabled).await;

        if enabled {
            self.start_auto_refresh().await;
        } else {
            self.stop_auto_refresh().await;
        }

        enabled
    }

    /// Starts the periodic timer if auto refresh is on, the display is
    /// visible and no timer is running yet
    ///
    /// # Returns
    /// True if a timer is running afterwards
    pub async fn start_auto_refresh(&self) -> bool {
        let mut state = self.state.lock().await;

        if !state.auto_refresh || state.visibility == Visibility::Hidden {
            return false;
        }
        if state.timer.as_ref().is_some_and(|t| !t.is_finished()) {
            return true;
        }

        state.timer = Some(self.spawn_timer());
        true
    }

    /// Cancels the periodic timer without touching the auto refresh flag
    ///
    /// A cycle already started by the timer keeps running to completion.
    pub async fn stop_auto_refresh(&self) {
        if let Some(timer) = self.state.lock().await.timer.take() {
            timer.abort();
            tracing::debug!("Auto refresh timer cancelled");
        }
    }

    /// Pauses the timer while hidden and resumes it when visible again
    pub async fn set_visibility(&self, visibility: Visibility) {
        self.state.lock().await.visibility = visibility;

        match visibility {
            Visibility::Hidden => self.stop_auto_refresh().await,
            Visibility::Visible => {
                self.start_auto_refresh().await;
            }
        }
    }

    /// Stops the timer and the clock
    pub async fn shutdown(&self) {
        self.stop_auto_refresh().await;
        if let Some(clock) = self.clock.lock().await.take() {
            clock.abort();
        }
        tracing::info!("Refresh controller stopped");
    }

    pub async fn is_auto_refresh_enabled(&self) -> bool {
        self.state.lock().await.auto_refresh
    }

    pub async fn is_timer_active(&self) -> bool {
        self.state
            .lock()
            .await
            .timer
            .as_ref()
            .is_some_and(|t| !t.is_finished())
    }

    fn spawn_timer(&self) -> JoinHandle<()> {
        let cycle = self.cycle.clone();
        let period = self.refresh_interval;

        tracing::info!(
            refresh_interval_secs = period.as_secs(),
            "Starting auto refresh timer"
        );

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                tracing::info!("Auto-refreshing data");

                // Detached so cancelling the timer never cuts a cycle short
                let cycle = cycle.clone();
                tokio::spawn(async move {
                    cycle.run().await;
                });
            }
        })
    }

    async fn start_clock(&self) {
        let mut clock = self.clock.lock().await;
        if clock.as_ref().is_some_and(|c| !c.is_finished()) {
            return;
        }

        let board = self.board.clone();
        let period = self.clock_interval;

        *clock = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                board.set_clock(format_clock(&Local::now())).await;
            }
        }));
    }
}

impl Drop for RefreshController {
    fn drop(&mut self) {
        if let Some(timer) = self.state.get_mut().timer.take() {
            timer.abort();
        }
        if let Some(clock) = self.clock.get_mut().take() {
            clock.abort();
        }
    }
}
