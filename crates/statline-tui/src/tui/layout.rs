// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Main Panel (fill)                                 |
// |   totals table or top-seasons table               |
// +--------------------------------------------------+
// | Help Bar / search prompt (1 row)                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: load status, player counts, active search.
    pub status_bar: Rect,
    /// Middle: the active table.
    pub main_panel: Rect,
    /// Bottom row: keyboard hints, or the search prompt while typing.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(3),    // main panel
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        main_panel: vertical[1],
        help_bar: vertical[2],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_are_one_row_and_panel_fills_the_rest() {
        let layout = build_layout(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.main_panel.height, 38);
        assert_eq!(layout.main_panel.width, 120);
    }

    #[test]
    fn zones_stack_top_to_bottom() {
        let layout = build_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.status_bar.y, 0);
        assert_eq!(layout.main_panel.y, 1);
        assert_eq!(layout.help_bar.y, 23);
    }
}
