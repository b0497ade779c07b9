// History widget: one line per archived season, oldest first.
//
// Each: "2025-26  44-32-6   94 pts  cap $80.50M  23 players  CUP"

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::protocol::SeasonRow;
use crate::tui::widgets::status_bar::{format_millions, season_label};

pub fn render(frame: &mut Frame, area: Rect, seasons: &[SeasonRow], scroll_offset: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Season History ({})", seasons.len()));

    if seasons.is_empty() {
        let paragraph = Paragraph::new("  No seasons archived yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let lines: Vec<Line> = seasons.iter().map(season_line).collect();
    let visible_rows = (area.height as usize).saturating_sub(2);
    let scroll = scroll_offset.min(lines.len().saturating_sub(visible_rows)) as u16;

    let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn season_line(row: &SeasonRow) -> Line<'static> {
    let mut spans = vec![Span::raw(format_season_text(row))];
    if row.won_cup {
        spans.push(Span::styled(
            "  CUP",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

/// Plain text for one season, without the championship marker.
pub fn format_season_text(row: &SeasonRow) -> String {
    let record = row.record.as_deref().unwrap_or("no record");
    let points = row
        .points
        .map(|p| format!("{p:>3} pts"))
        .unwrap_or_else(|| "  - pts".to_string());
    format!(
        " {}  {:<10} {}  cap {:>8}  {:>2} players",
        season_label(row.season),
        record,
        points,
        format_millions(row.cap_hit),
        row.players
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
