// Status bar widget: load status, active view, active search.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::ViewMode;
use crate::tui::{DisplayState, LoadStatus};

/// Render the status bar into the given area.
///
/// Layout: [load indicator] [load summary] | [view tabs] [search]
pub fn render(frame: &mut Frame, area: Rect, state: &DisplayState) {
    if area.is_empty() {
        return;
    }

    let mut spans = Vec::new();

    let (dot, dot_color) = load_indicator(&state.load_status);
    spans.push(Span::styled(format!(" {} ", dot), Style::default().fg(dot_color)));
    spans.push(Span::styled(
        load_summary(&state.load_status),
        Style::default().fg(Color::White),
    ));

    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    spans.extend(view_spans(state.mode));

    if !state.search_text.is_empty() {
        spans.push(Span::styled(
            format!("search: {}", state.search_text),
            Style::default().fg(Color::Yellow),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Indicator dot and its color for the load status.
pub fn load_indicator(status: &LoadStatus) -> (&'static str, Color) {
    match status {
        LoadStatus::Loading => ("●", Color::Yellow),
        LoadStatus::Loaded { .. } => ("●", Color::Green),
        LoadStatus::Failed(_) => ("●", Color::Red),
    }
}

/// One-line description of the load status.
pub fn load_summary(status: &LoadStatus) -> String {
    match status {
        LoadStatus::Loading => "Loading...".to_string(),
        LoadStatus::Loaded { rows, players } => {
            format!("{} seasons, {} players", rows, players)
        }
        LoadStatus::Failed(message) => format!("Failed: {}", message),
    }
}

/// View indicator spans with the active view highlighted.
pub fn view_spans(mode: ViewMode) -> Vec<Span<'static>> {
    let views = [
        (matches!(mode, ViewMode::Totals), "m:Totals"),
        (matches!(mode, ViewMode::TopSeasons { .. }), "t:Top Seasons"),
    ];

    let mut spans = Vec::new();
    for (active, label) in views {
        let style = if active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}]", label), style));
        spans.push(Span::raw(" "));
    }
    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
