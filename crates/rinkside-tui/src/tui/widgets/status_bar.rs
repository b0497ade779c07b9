// Status bar widget: team, season, GM, cap space, completion, tab bar.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::{AppSnapshot, TabId};
use crate::tui::ViewState;

/// Layout: [team] [season] [GM] [cap space] [state] | [tab bar]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let snap = &state.snapshot;
    let mut spans = vec![
        Span::styled(
            format!(" {} ", snap.nhl_team),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ", season_label(snap.season)),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("GM {} ", snap.general_manager),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("Cap space {} ", format_millions(snap.cap.space)),
            Style::default().fg(cap_space_color(snap.cap.space)),
        ),
    ];

    let (state_text, state_color) = franchise_state(snap);
    spans.push(Span::styled(state_text, Style::default().fg(state_color)));
    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    spans.extend(tab_spans(state.active_tab));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// "2025-26".
pub fn season_label(season: u32) -> String {
    format!("{}-{:02}", season, (season + 1) % 100)
}

/// "$80.50M", or "-$2.25M" when over.
pub fn format_millions(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}M", -amount)
    } else {
        format!("${:.2}M", amount)
    }
}

fn cap_space_color(space: f64) -> Color {
    if space < 0.0 {
        Color::Red
    } else if space < 5.0 {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn franchise_state(snap: &AppSnapshot) -> (String, Color) {
    match snap.completed_season {
        Some(season) => (format!("[COMPLETE {season}]"), Color::Magenta),
        None if snap.unsaved_changes => ("[unsaved]".to_string(), Color::Yellow),
        None => ("[saved]".to_string(), Color::DarkGray),
    }
}

/// "[1:Roster] [2:Cap] [3:Picks] [4:History] [5:Leaders]" with the active
/// tab highlighted.
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, tab) in TabId::ALL.into_iter().enumerate() {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}:{}]", i + 1, tab_label(tab)), style));
        spans.push(Span::raw(" "));
    }
    spans
}

pub fn tab_label(tab: TabId) -> &'static str {
    match tab {
        TabId::Roster => "Roster",
        TabId::Cap => "Cap",
        TabId::DraftPicks => "Picks",
        TabId::History => "History",
        TabId::Leaders => "Leaders",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
