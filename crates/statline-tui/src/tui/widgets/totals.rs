// Career totals widget: sortable, searchable table with one line per player.
//
// Columns: Player, Goals, Assists, Points, Seasons, PTS/S
// The active sort column carries a direction arrow in its header.
// Rows arrive already sorted and filtered from the controller.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;
use statline_core::stats::PlayerTotal;
use statline_core::view::{SortKey, SortState};

use crate::tui::DisplayState;

/// Scroll-offset key for this widget.
pub const WIDGET_KEY: &str = "totals";

/// Render the totals table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &DisplayState) {
    if area.is_empty() {
        return;
    }

    let header = Row::new(
        SortKey::ALL
            .iter()
            .map(|key| Cell::from(header_label(*key, state.sort)))
            .collect::<Vec<_>>(),
    )
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let offset = state.scroll_for(WIDGET_KEY);
    let rows: Vec<Row> = state
        .totals
        .iter()
        .skip(offset)
        .map(total_row)
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(build_title(state)));

    frame.render_widget(table, area);
}

fn total_row(p: &PlayerTotal) -> Row<'static> {
    Row::new(vec![
        Cell::from(p.player_name.clone()),
        Cell::from(p.goals.to_string()),
        Cell::from(p.assists.to_string()),
        Cell::from(p.points.to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(p.seasons.to_string()),
        Cell::from(format_rate(p.points_per_season)),
    ])
}

/// Column header text, with the sort arrow on the active column.
pub fn header_label(key: SortKey, sort: Option<SortState>) -> String {
    match sort {
        Some(s) if s.key == key => format!("{} {}", key.label(), s.dir.indicator()),
        _ => key.label().to_string(),
    }
}

/// Points per season with two decimals.
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}", rate)
}

/// Title with the visible/total player count and the active search.
fn build_title(state: &DisplayState) -> Line<'static> {
    let mut title = String::from("All-time Player Totals");
    if !state.search_text.is_empty() {
        title.push_str(&format!(" \"{}\"", state.search_text));
    }
    title.push_str(&format!(" ({}/{})", state.totals.len(), state.total_players));
    Line::from(title)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
