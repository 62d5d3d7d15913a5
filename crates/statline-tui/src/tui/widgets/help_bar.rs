// Help bar widget: keyboard hints, or the search prompt while typing.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::DisplayState;

const HINTS: &str =
    " sort: n g a p s r | /:search | t:top seasons | m:totals | j/k PgUp/PgDn:scroll | q:quit";

/// Render the help bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &DisplayState) {
    if area.is_empty() {
        return;
    }
    let line = if state.search_mode {
        search_prompt(&state.search_text)
    } else {
        Line::from(Span::styled(HINTS, Style::default().fg(Color::Gray)))
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// The search prompt with a trailing cursor.
pub fn search_prompt(text: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(" /", Style::default().fg(Color::Yellow)),
        Span::raw(text.to_string()),
        Span::styled("_", Style::default().fg(Color::Yellow)),
    ])
}
