// Cap widgets: the full breakdown tab and the sidebar summary.
//
// Key-value display:
// Ceiling, Floor, Committed, Space; space < 0 = red, below floor = yellow

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::protocol::CapView;
use crate::tui::widgets::status_bar::format_millions;

/// Sidebar: the four headline numbers.
pub fn render_summary(frame: &mut Frame, area: Rect, cap: &CapView) {
    let paragraph = Paragraph::new(summary_lines(cap))
        .block(Block::default().borders(Borders::ALL).title("Cap"));
    frame.render_widget(paragraph, area);
}

/// Main panel: headline numbers, per-position totals, expiring deals.
pub fn render(frame: &mut Frame, area: Rect, cap: &CapView) {
    let mut lines = summary_lines(cap);
    lines.push(Line::raw(""));
    lines.push(section_header(" By position"));
    if cap.by_position.is_empty() {
        lines.push(dim_line("   No signed NHL players."));
    }
    for group in &cap.by_position {
        lines.push(Line::raw(format!(
            "   {:<3} {:>2} signed  {:>9}  avg {}",
            group.position.display_str(),
            group.count,
            format_millions(group.total),
            format_millions(group.average)
        )));
    }

    lines.push(Line::raw(""));
    lines.push(section_header(" Expiring this season"));
    if cap.expiring.is_empty() {
        lines.push(dim_line("   None."));
    }
    for (name, aav) in &cap.expiring {
        lines.push(Line::raw(format!("   {:<24} {}", name, format_millions(*aav))));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Salary Cap"),
    );
    frame.render_widget(paragraph, area);
}

fn summary_lines(cap: &CapView) -> Vec<Line<'static>> {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Gray));
    vec![
        Line::from(vec![
            label(" Ceiling:   "),
            Span::raw(format_millions(cap.ceiling)),
        ]),
        Line::from(vec![
            label(" Floor:     "),
            Span::raw(format_millions(cap.floor)),
        ]),
        Line::from(vec![
            label(" Committed: "),
            Span::styled(
                format_millions(cap.total),
                Style::default().fg(committed_color(cap)),
            ),
        ]),
        Line::from(vec![
            label(" Space:     "),
            Span::styled(
                format_millions(cap.space),
                Style::default()
                    .fg(space_color(cap.space))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ]
}

/// Yellow while under the floor.
pub fn committed_color(cap: &CapView) -> Color {
    if cap.below_floor {
        Color::Yellow
    } else {
        Color::White
    }
}

/// Red when over the ceiling.
pub fn space_color(space: f64) -> Color {
    if space < 0.0 {
        Color::Red
    } else {
        Color::Cyan
    }
}

fn section_header(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn dim_line(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
