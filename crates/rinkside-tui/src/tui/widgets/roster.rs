// Roster widget: NHL roster, then AHL prospects, with the selected player
// highlighted.
//
// Each row: " C  Connor Reed            27  88  $9.50M x6  Elite"

use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use crate::protocol::{AppSnapshot, RosterRow};

pub fn render(frame: &mut Frame, area: Rect, snap: &AppSnapshot, selected: usize) {
    let title = format!(
        "Roster: {} ({}) / {} ({})",
        snap.nhl_team,
        snap.nhl_roster.len(),
        snap.ahl_team,
        snap.ahl_roster.len()
    );

    if snap.roster_len() == 0 {
        let paragraph = Paragraph::new("  No players on either roster.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
        return;
    }

    let lines = build_lines(snap, selected);
    let total = lines.len();
    let visible_rows = (area.height as usize).saturating_sub(2).max(1);

    // Keep the selected line on screen. Line index = selection + headers above it.
    let selected_line = selected + if selected < snap.nhl_roster.len() { 1 } else { 2 };
    let scroll_offset = selected_line
        .saturating_sub(visible_rows - 1)
        .min(total.saturating_sub(visible_rows));

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(scroll_offset)
        .take(visible_rows)
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);

    if total > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(visible_rows)).position(scroll_offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn build_lines(snap: &AppSnapshot, selected: usize) -> Vec<ListItem<'static>> {
    let header = |text: String| {
        ListItem::new(Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
    };

    let mut lines = Vec::with_capacity(snap.roster_len() + 2);
    lines.push(header(format!(" {} (NHL)", snap.nhl_team)));
    for (i, row) in snap.nhl_roster.iter().enumerate() {
        lines.push(format_row(row, i == selected));
    }
    lines.push(header(format!(" {} (AHL)", snap.ahl_team)));
    let offset = snap.nhl_roster.len();
    for (i, row) in snap.ahl_roster.iter().enumerate() {
        lines.push(format_row(row, offset + i == selected));
    }
    lines
}

fn format_row(row: &RosterRow, selected: bool) -> ListItem<'static> {
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if !row.signed {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    ListItem::new(Line::from(Span::styled(format_row_text(row), style)))
}

/// Plain text for one player row.
pub fn format_row_text(row: &RosterRow) -> String {
    let contract = if row.signed {
        format!("${:.2}M x{}", row.cap_hit, row.years_remaining)
    } else {
        "unsigned".to_string()
    };
    format!(
        " {:<2} {:<22} {:>3} {:>3}  {:<12} {}",
        row.position.display_str(),
        row.name,
        row.age,
        row.overall,
        contract,
        row.potential.unwrap_or("")
    )
    .trim_end()
    .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::{row, sample_snapshot};
    use rinkside_core::model::League;

    #[test]
    fn format_row_text_signed() {
        let mut r = row(1, "Connor Reed", League::Nhl);
        r.potential = Some("Elite");
        assert_eq!(
            format_row_text(&r),
            " C  Connor Reed             25  80  $2.50M x2    Elite"
        );
    }

    #[test]
    fn format_row_text_unsigned() {
        let mut r = row(3, "Ivan Petrov", League::Ahl);
        r.signed = false;
        assert!(format_row_text(&r).ends_with("unsigned"));
    }

    #[test]
    fn lines_include_both_headers() {
        let snap = sample_snapshot();
        assert_eq!(build_lines(&snap, 0).len(), 5);
    }

    #[test]
    fn render_does_not_panic_empty() {
        let backend = ratatui::backend::TestBackend::new(60, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let snap = AppSnapshot::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &snap, 0))
            .unwrap();
    }

    #[test]
    fn render_scrolls_to_selection() {
        let backend = ratatui::backend::TestBackend::new(80, 5);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut snap = sample_snapshot();
        for id in 10..30 {
            snap.ahl_roster.push(row(id, &format!("Prospect {id}"), League::Ahl));
        }
        let last = snap.roster_len() - 1;
        terminal
            .draw(|frame| render(frame, frame.area(), &snap, last))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Prospect 29"));
    }
}
