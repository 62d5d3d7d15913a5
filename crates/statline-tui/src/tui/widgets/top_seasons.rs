// Top seasons widget: the best individual seasons by points.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;
use statline_core::stats::SeasonRow;

use crate::tui::DisplayState;

/// Scroll-offset key for this widget.
pub const WIDGET_KEY: &str = "top_seasons";

/// Render the season ranking into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &DisplayState) {
    if area.is_empty() {
        return;
    }

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Player"),
        Cell::from("Season"),
        Cell::from("Goals"),
        Cell::from("Assists"),
        Cell::from("Points"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let offset = state.scroll_for(WIDGET_KEY);
    let rows: Vec<Row> = state
        .top_seasons
        .iter()
        .enumerate()
        .skip(offset)
        .map(|(i, row)| season_row(i + 1, row))
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Length(7),
    ];

    let title = format!("Top {} Individual Seasons", state.top_seasons.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}

fn season_row(rank: usize, row: &SeasonRow) -> Row<'static> {
    Row::new(vec![
        Cell::from(rank.to_string()),
        Cell::from(row.display_name()),
        Cell::from(format_year(row.year.as_deref())),
        Cell::from(row.goals.to_string()),
        Cell::from(row.assists.to_string()),
        Cell::from(row.effective_points().to_string())
            .style(Style::default().add_modifier(Modifier::BOLD)),
    ])
}

/// Season label, "--" when the row carries none.
pub fn format_year(year: Option<&str>) -> String {
    year.unwrap_or("--").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::test_support::buffer_text;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use serde_json::json;

    fn season(value: serde_json::Value) -> SeasonRow {
        SeasonRow::from_value(&value).unwrap()
    }

    fn draw(state: &DisplayState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 8)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn format_year_placeholder() {
        assert_eq!(format_year(Some("2020")), "2020");
        assert_eq!(format_year(None), "--");
    }

    #[test]
    fn render_shows_effective_points_and_title() {
        let mut state = DisplayState::default();
        state.top_seasons = vec![
            season(json!({"player_id": 1, "playername": "Ann Larsen", "year": 2020, "goals": 14, "assists": 12})),
            season(json!({"player_id": 2, "playername": "Bob Okafor", "goals": 3, "assists": 4, "points": 9})),
        ];

        let text = draw(&state);
        assert!(text.contains("Top 2 Individual Seasons"));
        assert!(text.contains("Ann Larsen"));
        assert!(text.contains("2020"));
        assert!(text.contains("26"));
        assert!(text.contains("--"));
        assert!(text.contains("9"));
    }

    #[test]
    fn render_empty_ranking() {
        let state = DisplayState::default();
        let text = draw(&state);
        assert!(text.contains("Top 0 Individual Seasons"));
    }

    #[test]
    fn render_into_empty_area_is_noop() {
        let state = DisplayState::default();
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        terminal
            .draw(|frame| render(frame, Rect::default(), &state))
            .unwrap();
        assert!(buffer_text(terminal.backend().buffer()).trim().is_empty());
    }
}
