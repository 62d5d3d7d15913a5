// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// controller, or into local DisplayState mutations (scrolling, the search
// prompt).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use statline_core::view::SortKey;

use super::widgets;
use super::DisplayState;
use crate::protocol::{UserCommand, ViewMode};

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: usize = 20;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// controller. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, state: &mut DisplayState) -> Option<UserCommand> {
    // Windows reports both Press and Release; only act on Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits, even while typing a search.
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if state.search_mode {
        return handle_search_mode(key_event, state);
    }

    match key_event.code {
        // Sorting
        KeyCode::Char('n') => Some(UserCommand::SortBy(SortKey::PlayerName)),
        KeyCode::Char('g') => Some(UserCommand::SortBy(SortKey::Goals)),
        KeyCode::Char('a') => Some(UserCommand::SortBy(SortKey::Assists)),
        KeyCode::Char('p') => Some(UserCommand::SortBy(SortKey::Points)),
        KeyCode::Char('s') => Some(UserCommand::SortBy(SortKey::Seasons)),
        KeyCode::Char('r') => Some(UserCommand::SortBy(SortKey::PointsPerSeason)),

        // Views
        KeyCode::Char('t') => Some(UserCommand::ShowTopSeasons { limit: None }),
        KeyCode::Char('m') => Some(UserCommand::ShowTotals),

        // Search prompt
        KeyCode::Char('/') => {
            state.search_mode = true;
            None
        }

        // Esc: clear the search first, then leave the season ranking.
        KeyCode::Esc => {
            if !state.search_text.is_empty() {
                state.search_text.clear();
                Some(UserCommand::Search(String::new()))
            } else if matches!(state.mode, ViewMode::TopSeasons { .. }) {
                Some(UserCommand::ShowTotals)
            } else {
                None
            }
        }

        // Scrolling
        KeyCode::Up | KeyCode::Char('k') => {
            scroll_up(state, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            scroll_down(state, 1);
            None
        }
        KeyCode::PageUp => {
            scroll_up(state, PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            scroll_down(state, PAGE_SIZE);
            None
        }
        KeyCode::Home => {
            state
                .scroll_offset
                .insert(active_widget_key(state).to_string(), 0);
            None
        }

        KeyCode::Char('q') => Some(UserCommand::Quit),

        _ => None,
    }
}

/// Handle key events while the search prompt is open.
///
/// - Printable characters extend the search text
/// - Backspace removes the last character
/// - Enter closes the prompt and keeps the text
/// - Esc closes the prompt and clears the text
///
/// Every edit is forwarded so the table filters as the user types.
fn handle_search_mode(key_event: KeyEvent, state: &mut DisplayState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            state.search_mode = false;
            state.search_text.clear();
            Some(UserCommand::Search(String::new()))
        }
        KeyCode::Enter => {
            state.search_mode = false;
            None
        }
        KeyCode::Backspace => {
            state.search_text.pop()?;
            Some(UserCommand::Search(state.search_text.clone()))
        }
        KeyCode::Char(c) => {
            state.search_text.push(c);
            Some(UserCommand::Search(state.search_text.clone()))
        }
        _ => None,
    }
}

/// Widget key for the scroll state of the active view.
fn active_widget_key(state: &DisplayState) -> &'static str {
    match state.mode {
        ViewMode::Totals => widgets::totals::WIDGET_KEY,
        ViewMode::TopSeasons { .. } => widgets::top_seasons::WIDGET_KEY,
    }
}

/// Number of rows in the active view.
fn active_row_count(state: &DisplayState) -> usize {
    match state.mode {
        ViewMode::Totals => state.totals.len(),
        ViewMode::TopSeasons { .. } => state.top_seasons.len(),
    }
}

fn scroll_up(state: &mut DisplayState, lines: usize) {
    let key = active_widget_key(state);
    let offset = state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_sub(lines);
}

fn scroll_down(state: &mut DisplayState, lines: usize) {
    let max = active_row_count(state).saturating_sub(1);
    let key = active_widget_key(state);
    let offset = state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_add(lines).min(max);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
