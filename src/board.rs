//! In-memory render target with broadcast notifications
//!
//! The board owns one content slot per panel plus the status line, the
//! clock and the state of the two controls. Each panel slot is written only
//! by its own renderer; concurrent writers to the same slot resolve as
//! last-write-wins.

use crate::{
    panels::{PanelBody, PanelKind, PanelUpdate},
    types::RefreshStatus,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tokio::sync::{broadcast, RwLock};

/// Capacity of the board event channel
const EVENT_CHANNEL_CAPACITY: usize = 64;

pub const REFRESH_LABEL: &str = "REFRESH";
pub const REFRESHING_LABEL: &str = "REFRESHING...";
pub const DISABLE_AUTO_LABEL: &str = "DISABLE AUTO";
pub const ENABLE_AUTO_LABEL: &str = "ENABLE AUTO";

/// Current content of one panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSlot {
    pub body: PanelBody,
    /// Error behind an error placeholder
    pub error: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Label and enabled flag of an interactive control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub label: &'static str,
    pub enabled: bool,
}

/// Change notifications for front-ends
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    PanelUpdated(PanelKind),
    StatusChanged(RefreshStatus),
    ClockTick(String),
    ControlsChanged,
}

/// Point-in-time copy of the whole board
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    pub panels: BTreeMap<PanelKind, PanelSlot>,
    pub status: RefreshStatus,
    pub clock: String,
    pub refresh_control: ControlState,
    pub auto_control: ControlState,
}

pub struct Board {
    state: RwLock<BoardSnapshot>,
    events: broadcast::Sender<BoardEvent>,
}

impl Board {
    /// Creates an empty board with auto refresh shown as enabled
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            state: RwLock::new(BoardSnapshot {
                panels: BTreeMap::new(),
                status: RefreshStatus::Idle,
                clock: String::new(),
                refresh_control: ControlState {
                    label: REFRESH_LABEL,
                    enabled: true,
                },
                auto_control: ControlState {
                    label: DISABLE_AUTO_LABEL,
                    enabled: true,
                },
            }),
            events,
        }
    }

    /// Sets the initial toggle label before the board is shared
    pub fn with_auto_refresh(mut self, enabled: bool) -> Self {
        self.state.get_mut().auto_control.label = auto_label(enabled);
        self
    }

    /// Subscribes to board changes
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    /// Replaces a panel's content with a fresh update
    pub async fn apply(&self, update: PanelUpdate) {
        let kind = update.kind;
        {
            let mut state = self.state.write().await;
            state.panels.insert(
                kind,
                PanelSlot {
                    body: update.body,
                    error: update.error,
                    updated_at: Utc::now(),
                },
            );
        }
        tracing::debug!(panel = kind.name(), "Panel content replaced");
        self.notify(BoardEvent::PanelUpdated(kind));
    }

    /// Gets the current content of a panel
    pub async fn panel(&self, kind: PanelKind) -> Option<PanelSlot> {
        self.state.read().await.panels.get(&kind).cloned()
    }

    pub async fn set_status(&self, status: RefreshStatus) {
        self.state.write().await.status = status;
        self.notify(BoardEvent::StatusChanged(status));
    }

    pub async fn status(&self) -> RefreshStatus {
        self.state.read().await.status
    }

    pub async fn set_clock(&self, text: String) {
        self.state.write().await.clock = text.clone();
        self.notify(BoardEvent::ClockTick(text));
    }

    pub async fn clock(&self) -> String {
        self.state.read().await.clock.clone()
    }

    /// Shows the manual refresh control as busy (disabled) or idle
    pub async fn set_refresh_busy(&self, busy: bool) {
        self.state.write().await.refresh_control = if busy {
            ControlState {
                label: REFRESHING_LABEL,
                enabled: false,
            }
        } else {
            ControlState {
                label: REFRESH_LABEL,
                enabled: true,
            }
        };
        self.notify(BoardEvent::ControlsChanged);
    }

    pub async fn refresh_control(&self) -> ControlState {
        self.state.read().await.refresh_control
    }

    /// Updates the toggle label for the given auto refresh state
    pub async fn set_auto_refresh(&self, enabled: bool) {
        self.state.write().await.auto_control.label = auto_label(enabled);
        self.notify(BoardEvent::ControlsChanged);
    }

    pub async fn auto_control(&self) -> ControlState {
        self.state.read().await.auto_control
    }

    pub async fn snapshot(&self) -> BoardSnapshot {
        self.state.read().await.clone()
    }

    fn notify(&self, event: BoardEvent) {
        // No receivers is fine; nobody is drawing yet.
        let _ = self.events.send(event);
    }
}

fn auto_label(enabled: bool) -> &'static str {
    if enabled {
        DISABLE_AUTO_LABEL
    } else {
        ENABLE_AUTO_LABEL
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
