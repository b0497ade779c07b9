// TUI widget modules for each dashboard panel.

pub mod cap;
pub mod confirm;
pub mod draft_picks;
pub mod franchise;
pub mod history;
pub mod leaders;
pub mod roster;
pub mod status_bar;
