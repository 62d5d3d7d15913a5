// TUI widget modules for each dashboard panel.

pub mod help_bar;
pub mod status_bar;
pub mod top_seasons;
pub mod totals;
