// Messages exchanged between the controller task and the TUI.

use statline_core::stats::{PlayerTotal, SeasonRow};
use statline_core::view::{SortKey, SortState};

/// Which table the main panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Career totals, one line per player.
    Totals,
    /// Best individual seasons.
    TopSeasons { limit: usize },
}

/// Commands sent from the TUI to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Re-sort the totals table, keeping the current search.
    SortBy(SortKey),
    /// Replace the search text, keeping the current sort.
    Search(String),
    /// Switch to the individual-season ranking. `None` uses the configured
    /// default limit.
    ShowTopSeasons { limit: Option<usize> },
    /// Switch back to the totals table.
    ShowTotals,
    Quit,
}

/// The totals table as it should be drawn right now.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalsSnapshot {
    /// Rows after sorting and filtering.
    pub rows: Vec<PlayerTotal>,
    pub sort: Option<SortState>,
    /// Active (case-folded) search text.
    pub search: String,
    /// Number of players before filtering.
    pub total_players: usize,
}

/// Updates pushed from the controller to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// The score file loaded.
    Loaded { rows: usize, players: usize },
    /// The score file could not be loaded; tables stay empty.
    LoadFailed(String),
    /// New contents for the totals table.
    Totals(Box<TotalsSnapshot>),
    /// New contents for the individual-season ranking.
    TopSeasons { rows: Vec<SeasonRow>, limit: usize },
}
