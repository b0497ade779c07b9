// Library root: exposes the app task, protocol and TUI so tests can reach
// them.

pub mod app;
pub mod protocol;
pub mod tui;
