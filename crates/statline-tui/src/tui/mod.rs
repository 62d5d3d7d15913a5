// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `DisplayState` that mirrors what the controller last sent.
// The controller pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them to `DisplayState` and re-renders at ~30 fps. Key presses that
// change sort, search or view become `UserCommand`s; scrolling and the
// search prompt are handled locally.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use statline_core::stats::{PlayerTotal, SeasonRow};
use statline_core::view::SortState;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::protocol::{UiUpdate, UserCommand, ViewMode};

use layout::build_layout;

// ---------------------------------------------------------------------------
// LoadStatus
// ---------------------------------------------------------------------------

/// Progress of the one-time data load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Loaded { rows: usize, players: usize },
    Failed(String),
}

// ---------------------------------------------------------------------------
// DisplayState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the controller's output for rendering.
pub struct DisplayState {
    pub load_status: LoadStatus,
    /// Which table the main panel shows.
    pub mode: ViewMode,
    /// Totals rows, already sorted and filtered by the controller.
    pub totals: Vec<PlayerTotal>,
    /// Player count before filtering.
    pub total_players: usize,
    /// Active sort, for the header indicator.
    pub sort: Option<SortState>,
    /// Rows of the individual-season ranking.
    pub top_seasons: Vec<SeasonRow>,
    /// Search text as typed.
    pub search_text: String,
    /// Whether the search prompt is capturing keys.
    pub search_mode: bool,
    /// Per-widget scroll offsets (keyed by widget name).
    pub scroll_offset: HashMap<String, usize>,
}

impl Default for DisplayState {
    fn default() -> Self {
        DisplayState {
            load_status: LoadStatus::Loading,
            mode: ViewMode::Totals,
            totals: Vec::new(),
            total_players: 0,
            sort: None,
            top_seasons: Vec::new(),
            search_text: String::new(),
            search_mode: false,
            scroll_offset: HashMap::new(),
        }
    }
}

impl DisplayState {
    /// Scroll offset for a widget, 0 if it has never scrolled.
    pub fn scroll_for(&self, widget: &str) -> usize {
        self.scroll_offset.get(widget).copied().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the DisplayState.
fn apply_ui_update(state: &mut DisplayState, update: UiUpdate) {
    match update {
        UiUpdate::Loaded { rows, players } => {
            state.load_status = LoadStatus::Loaded { rows, players };
        }
        UiUpdate::LoadFailed(message) => {
            state.load_status = LoadStatus::Failed(message);
        }
        UiUpdate::Totals(snapshot) => {
            let snapshot = *snapshot;
            state.mode = ViewMode::Totals;
            state.totals = snapshot.rows;
            state.total_players = snapshot.total_players;
            state.sort = snapshot.sort;
            // The filtered list may be shorter than the old scroll position.
            state.scroll_offset.insert(widgets::totals::WIDGET_KEY.to_string(), 0);
        }
        UiUpdate::TopSeasons { rows, limit } => {
            state.mode = ViewMode::TopSeasons { limit };
            state.top_seasons = rows;
            state
                .scroll_offset
                .insert(widgets::top_seasons::WIDGET_KEY.to_string(), 0);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &DisplayState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    match state.mode {
        ViewMode::Totals => widgets::totals::render(frame, layout.main_panel, state),
        ViewMode::TopSeasons { .. } => {
            widgets::top_seasons::render(frame, layout.main_panel, state)
        }
    }
    widgets::help_bar::render(frame, layout.help_bar, state);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (enters raw mode, enables alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut display = DisplayState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut ui_open = true;

    let result = loop {
        tokio::select! {
            // UI updates from the controller
            update = ui_rx.recv(), if ui_open => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut display, ui_update),
                    None => {
                        // Controller is gone; keep showing the last state.
                        info!("UI update channel closed");
                        ui_open = false;
                    }
                }
            }

            // Keyboard input
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut display) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events: the next tick redraws.
                    }
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        break Err(e.into());
                    }
                    None => break Ok(()),
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &display)) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
