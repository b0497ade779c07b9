// All-time leaders widget: career NHL totals across archived seasons,
// already sorted by points.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use rinkside_core::archive::LeaderLine;

const HEADERS: [&str; 7] = ["#", "Player", "Yrs", "GP", "G", "A", "P"];

pub fn render(frame: &mut Frame, area: Rect, leaders: &[LeaderLine], scroll_offset: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("All-Time Leaders");

    if leaders.is_empty() {
        let paragraph = Paragraph::new("  No archived player stats.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    // borders + header row
    let visible_rows = (area.height as usize).saturating_sub(3);
    let offset = scroll_offset.min(leaders.len().saturating_sub(visible_rows));

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h))).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = leaders
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows.max(1))
        .map(|(rank, line)| leader_row(rank + 1, line))
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(18),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn leader_row(rank: usize, line: &LeaderLine) -> Row<'static> {
    let style = if rank == 1 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Row::new(vec![
        Cell::from(rank.to_string()),
        Cell::from(line.name.clone()),
        Cell::from(line.seasons.to_string()),
        Cell::from(line.games_played.to_string()),
        Cell::from(line.goals.to_string()),
        Cell::from(line.assists.to_string()),
        Cell::from(line.points.to_string()),
    ])
    .style(style)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn leader(name: &str, points: u32) -> LeaderLine {
        LeaderLine {
            name: name.into(),
            player_id: None,
            seasons: 3,
            games_played: 240,
            goals: points / 2,
            assists: points - points / 2,
            points,
        }
    }

    fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn render_lists_leaders_in_order() {
        let backend = ratatui::backend::TestBackend::new(60, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let leaders = vec![leader("Connor Reed", 273), leader("Ivan Petrov", 150)];
        terminal
            .draw(|frame| render(frame, frame.area(), &leaders, 0))
            .unwrap();
        let text = buffer_text(&terminal);
        let first = text.find("Connor Reed").unwrap();
        let second = text.find("Ivan Petrov").unwrap();
        assert!(first < second);
        assert!(text.contains("273"));
    }

    #[test]
    fn scroll_is_clamped() {
        let backend = ratatui::backend::TestBackend::new(60, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let leaders: Vec<LeaderLine> = (0..10)
            .map(|i| leader(&format!("Skater {i}"), 100 - i))
            .collect();
        terminal
            .draw(|frame| render(frame, frame.area(), &leaders, 99))
            .unwrap();
        // 3 visible rows, last page starts at rank 8
        assert!(buffer_text(&terminal).contains("Skater 9"));
    }

    #[test]
    fn render_does_not_panic_empty() {
        let backend = ratatui::backend::TestBackend::new(40, 5);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &[], 0))
            .unwrap();
    }
}
