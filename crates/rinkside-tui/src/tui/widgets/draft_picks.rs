// Draft picks widget: every pick the club holds, grouped by year.

use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use rinkside_core::DraftPick;

/// `picks` must already be ordered by year then round.
pub fn render(frame: &mut Frame, area: Rect, picks: &[DraftPick], scroll_offset: usize) {
    if picks.is_empty() {
        let paragraph = Paragraph::new("  No draft picks held.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Draft Picks"));
        frame.render_widget(paragraph, area);
        return;
    }

    let lines = build_lines(picks);
    let total = lines.len();
    let visible_rows = (area.height as usize).saturating_sub(2);
    let scroll_offset = scroll_offset.min(total.saturating_sub(visible_rows));

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(scroll_offset)
        .take(visible_rows.max(1))
        .collect();

    let acquired = picks.iter().filter(|p| p.was_traded).count();
    let title = format!("Draft Picks ({}, {} acquired)", picks.len(), acquired);
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

/// A header line per year followed by that year's picks. Acquired picks
/// are green.
fn build_lines(picks: &[DraftPick]) -> Vec<ListItem<'static>> {
    let mut lines = Vec::new();
    let mut current_year = None;
    for pick in picks {
        if current_year != Some(pick.year) {
            current_year = Some(pick.year);
            lines.push(ListItem::new(Line::from(Span::styled(
                format!(" {}", pick.year),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))));
        }
        let color = if pick.was_traded {
            Color::Green
        } else {
            Color::White
        };
        lines.push(ListItem::new(Line::from(Span::styled(
            format!("   {}", pick.display_string()),
            Style::default().fg(color),
        ))));
    }
    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rinkside_core::DraftPickLedger;

    fn ledger_picks() -> Vec<DraftPick> {
        let mut ledger = DraftPickLedger::new();
        ledger.generate_picks(2025, 2, "Falcons");
        ledger.add_acquired_pick(2025, 3, "Kings", "Falcons");
        let mut picks: Vec<DraftPick> = ledger.iter().cloned().collect();
        picks.sort_by_key(|p| (p.year, p.round));
        picks
    }

    #[test]
    fn one_header_per_year() {
        let picks = ledger_picks();
        // 15 picks + 2 year headers
        assert_eq!(build_lines(&picks).len(), 17);
    }

    #[test]
    fn render_shows_acquired_origin() {
        let backend = ratatui::backend::TestBackend::new(60, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let picks = ledger_picks();
        terminal
            .draw(|frame| render(frame, frame.area(), &picks, 0))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("2025 3rd Round Pick (from Kings)"));
        assert!(text.contains("15, 1 acquired"));
    }

    #[test]
    fn render_clamps_large_scroll() {
        let backend = ratatui::backend::TestBackend::new(60, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let picks = ledger_picks();
        terminal
            .draw(|frame| render(frame, frame.area(), &picks, 500))
            .unwrap();
    }

    #[test]
    fn render_does_not_panic_empty() {
        let backend = ratatui::backend::TestBackend::new(40, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &[], 0))
            .unwrap();
    }
}
