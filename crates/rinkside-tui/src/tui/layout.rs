// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +-------------------------+------------------------+
// | Main Panel (68%)         | Sidebar (32%)          |
// |                          | +- Cap (60%) --------+ |
// |                          | +- Franchise (40%) --+ |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Team, season, cap space, completion state, tab bar.
    pub status_bar: Rect,
    /// Tab-switched content area.
    pub main_panel: Rect,
    /// Sidebar top: cap summary.
    pub cap_summary: Rect,
    /// Sidebar bottom: cups, grade, pick count.
    pub franchise_summary: Rect,
    /// Key hints or the latest notice.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(8),    // main + sidebar
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(vertical[1]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(horizontal[1]);

    AppLayout {
        status_bar: vertical[0],
        main_panel: horizontal[0],
        cap_summary: sidebar[0],
        franchise_summary: sidebar[1],
        help_bar: vertical[2],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
