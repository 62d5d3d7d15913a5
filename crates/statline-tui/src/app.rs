// Application state and orchestration logic.
//
// The controller owns every piece of mutable statistics state: the season
// rows, the aggregated totals, the sort/search view state and the active
// view. It performs the one-time data load, then handles user commands from
// the TUI one at a time and pushes the resulting tables back as `UiUpdate`s.

use statline_core::stats::{build_player_totals, top_seasons, DataFormat, PlayerTotal, SeasonRow};
use statline_core::view::{sort_totals, SortKey, ViewState};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::protocol::{TotalsSnapshot, UiUpdate, UserCommand, ViewMode};
use crate::source::{load_rows, ScoreSource};

// ---------------------------------------------------------------------------
// StatsState
// ---------------------------------------------------------------------------

/// The complete statistics state, owned by the controller task.
#[derive(Debug, Clone)]
pub struct StatsState {
    /// Season rows as loaded. Never modified after `load`.
    pub rows: Vec<SeasonRow>,
    /// Career totals, in the current sort order.
    pub totals: Vec<PlayerTotal>,
    pub view: ViewState,
    pub mode: ViewMode,
    /// Default row count for the individual-season ranking.
    pub top_seasons_limit: usize,
}

impl StatsState {
    pub fn new(top_seasons_limit: usize) -> Self {
        StatsState {
            rows: Vec::new(),
            totals: Vec::new(),
            view: ViewState::new(),
            mode: ViewMode::Totals,
            top_seasons_limit,
        }
    }

    /// Install freshly loaded rows and aggregate them. Any sort chosen before
    /// the data arrived is applied to the new totals.
    pub fn load(&mut self, rows: Vec<SeasonRow>) {
        self.totals = build_player_totals(&rows);
        self.rows = rows;
        if let Some(sort) = self.view.sort() {
            sort_totals(&mut self.totals, sort);
        }
        info!(
            "Aggregated {} season rows into {} players",
            self.rows.len(),
            self.totals.len()
        );
    }

    /// Sort the totals by `key` and return the table to display.
    pub fn sort_by(&mut self, key: SortKey) -> TotalsSnapshot {
        let sort = self.view.apply_sort(&mut self.totals, key);
        debug!("Sorted totals by {:?} {:?}", sort.key, sort.dir);
        self.show_totals()
    }

    /// Change the search text and return the table to display.
    pub fn search(&mut self, text: &str) -> TotalsSnapshot {
        self.view.set_search(text);
        self.show_totals()
    }

    /// Switch back to the totals table.
    pub fn show_totals(&mut self) -> TotalsSnapshot {
        self.mode = ViewMode::Totals;
        self.totals_snapshot()
    }

    /// Switch to the individual-season ranking. Returns its rows and the
    /// limit that was applied (`None` means the configured default).
    pub fn show_top_seasons(&mut self, limit: Option<usize>) -> (Vec<SeasonRow>, usize) {
        let limit = limit.unwrap_or(self.top_seasons_limit);
        self.mode = ViewMode::TopSeasons { limit };
        (top_seasons(&self.rows, limit), limit)
    }

    /// Totals in the current order, filtered by the current search.
    pub fn visible_totals(&self) -> Vec<PlayerTotal> {
        self.view.visible(&self.totals).into_iter().cloned().collect()
    }

    /// Everything the TUI needs to draw the totals table.
    pub fn totals_snapshot(&self) -> TotalsSnapshot {
        TotalsSnapshot {
            rows: self.visible_totals(),
            sort: self.view.sort(),
            search: self.view.search().to_string(),
            total_players: self.totals.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the controller: load the score file, then process user commands until
/// `Quit` arrives or the command channel closes.
///
/// A failed load is logged and reported to the TUI; the tables stay empty
/// and commands keep being served against the empty state.
pub async fn run(
    source: Box<dyn ScoreSource>,
    format: DataFormat,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: StatsState,
) -> anyhow::Result<()> {
    info!("Controller started");

    match load_rows(source.as_ref(), format).await {
        Ok(rows) => {
            state.load(rows);
            let _ = ui_tx
                .send(UiUpdate::Loaded {
                    rows: state.rows.len(),
                    players: state.totals.len(),
                })
                .await;
            let _ = ui_tx
                .send(UiUpdate::Totals(Box::new(state.totals_snapshot())))
                .await;
        }
        Err(e) => {
            error!("Failed to load season data: {}", e);
            let _ = ui_tx.send(UiUpdate::LoadFailed(e.to_string())).await;
        }
    }

    while let Some(cmd) = cmd_rx.recv().await {
        if cmd == UserCommand::Quit {
            info!("Quit command received, shutting down");
            return Ok(());
        }
        handle_user_command(&mut state, cmd, &ui_tx).await;
    }

    info!("Command channel closed, shutting down");
    Ok(())
}

/// Handle a user command from the TUI.
async fn handle_user_command(
    state: &mut StatsState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::SortBy(key) => {
            let snapshot = state.sort_by(key);
            let _ = ui_tx.send(UiUpdate::Totals(Box::new(snapshot))).await;
        }
        UserCommand::Search(text) => {
            let snapshot = state.search(&text);
            let _ = ui_tx.send(UiUpdate::Totals(Box::new(snapshot))).await;
        }
        UserCommand::ShowTotals => {
            let snapshot = state.show_totals();
            let _ = ui_tx.send(UiUpdate::Totals(Box::new(snapshot))).await;
        }
        UserCommand::ShowTopSeasons { limit } => {
            let (rows, limit) = state.show_top_seasons(limit);
            info!("Showing top {} individual seasons", limit);
            let _ = ui_tx.send(UiUpdate::TopSeasons { rows, limit }).await;
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use statline_core::view::SortDir;

    fn season(value: serde_json::Value) -> SeasonRow {
        SeasonRow::from_value(&value).unwrap()
    }

    fn loaded_state() -> StatsState {
        let mut state = StatsState::new(10);
        state.load(vec![
            season(json!({"player_id": 1, "playername": "Ann", "points": 5})),
            season(json!({"player_id": 2, "playername": "Bob", "points": 1})),
            season(json!({"player_id": 3, "playername": "Cara", "points": 3})),
        ]);
        state
    }

    fn names(rows: &[PlayerTotal]) -> Vec<&str> {
        rows.iter().map(|p| p.player_name.as_str()).collect()
    }

    #[test]
    fn new_state_is_empty() {
        let state = StatsState::new(10);
        assert!(state.rows.is_empty());
        assert!(state.totals.is_empty());
        assert_eq!(state.mode, ViewMode::Totals);
        assert_eq!(state.view.sort(), None);
    }

    #[test]
    fn load_keeps_first_appearance_order() {
        let state = loaded_state();
        assert_eq!(names(&state.visible_totals()), vec!["Ann", "Bob", "Cara"]);
    }

    #[test]
    fn sort_then_search_composes() {
        let mut state = loaded_state();
        assert_eq!(names(&state.sort_by(SortKey::Points).rows), vec!["Ann", "Cara", "Bob"]);
        assert_eq!(names(&state.search("A").rows), vec!["Ann", "Cara"]);
        // Sorting again keeps the search.
        assert_eq!(names(&state.sort_by(SortKey::Points).rows), vec!["Cara", "Ann"]);
    }

    #[test]
    fn search_then_sort_composes() {
        let mut state = loaded_state();
        assert_eq!(names(&state.search("a").rows), vec!["Ann", "Cara"]);
        // Sorting filters the freshly sorted list with the kept search.
        assert_eq!(names(&state.sort_by(SortKey::Points).rows), vec!["Ann", "Cara"]);
        assert_eq!(names(&state.sort_by(SortKey::Points).rows), vec!["Cara", "Ann"]);
        // Clearing the search shows everyone in the current order.
        assert_eq!(names(&state.search("").rows), vec!["Bob", "Cara", "Ann"]);
    }

    #[test]
    fn sort_and_search_do_not_reaggregate() {
        let mut state = loaded_state();
        let before: Vec<PlayerTotal> = {
            let mut t = state.totals.clone();
            t.sort_by(|a, b| a.player_id.cmp(&b.player_id));
            t
        };
        state.sort_by(SortKey::PlayerName);
        state.search("a");
        let mut after = state.totals.clone();
        after.sort_by(|a, b| a.player_id.cmp(&b.player_id));
        assert_eq!(before, after);
    }

    #[test]
    fn sort_chosen_before_load_applies_to_loaded_data() {
        let mut state = StatsState::new(10);
        assert!(state.sort_by(SortKey::Points).rows.is_empty());
        state.load(vec![
            season(json!({"player_id": 1, "playername": "Low", "points": 1})),
            season(json!({"player_id": 2, "playername": "High", "points": 9})),
        ]);
        assert_eq!(names(&state.visible_totals()), vec!["High", "Low"]);
    }

    #[test]
    fn top_seasons_switches_mode_and_uses_default_limit() {
        let mut state = loaded_state();
        state.top_seasons_limit = 2;
        let (rows, limit) = state.show_top_seasons(None);
        assert_eq!(limit, 2);
        assert_eq!(state.mode, ViewMode::TopSeasons { limit: 2 });
        let shown: Vec<String> = rows.iter().map(SeasonRow::display_name).collect();
        assert_eq!(shown, vec!["Ann", "Cara"]);

        // Rows themselves are untouched.
        assert_eq!(state.rows[0].display_name(), "Ann");
        assert_eq!(state.rows[1].display_name(), "Bob");

        state.show_totals();
        assert_eq!(state.mode, ViewMode::Totals);
    }

    #[test]
    fn snapshot_reports_sort_and_search() {
        let mut state = loaded_state();
        state.sort_by(SortKey::Goals);
        state.search("ANN");
        let snap = state.totals_snapshot();
        assert_eq!(snap.sort.map(|s| s.dir), Some(SortDir::Desc));
        assert_eq!(snap.search, "ann");
        assert_eq!(snap.total_players, 3);
        assert_eq!(names(&snap.rows), vec!["Ann"]);
    }

    #[tokio::test]
    async fn handle_command_pushes_update() {
        let mut state = loaded_state();
        let (ui_tx, mut ui_rx) = mpsc::channel(8);

        handle_user_command(&mut state, UserCommand::SortBy(SortKey::Points), &ui_tx).await;
        match ui_rx.recv().await.unwrap() {
            UiUpdate::Totals(snap) => assert_eq!(names(&snap.rows), vec!["Ann", "Cara", "Bob"]),
            other => panic!("unexpected update: {other:?}"),
        }

        handle_user_command(
            &mut state,
            UserCommand::ShowTopSeasons { limit: Some(1) },
            &ui_tx,
        )
        .await;
        match ui_rx.recv().await.unwrap() {
            UiUpdate::TopSeasons { rows, limit } => {
                assert_eq!(limit, 1);
                assert_eq!(rows.len(), 1);
            }
            other => panic!("unexpected update: {other:?}"),
        }
    }
}
