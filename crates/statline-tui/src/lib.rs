// Library root: re-exports all modules so integration tests and the binary
// can reach the controller, data sources and TUI.

pub mod app;
pub mod config;
pub mod protocol;
pub mod source;
pub mod tui;
