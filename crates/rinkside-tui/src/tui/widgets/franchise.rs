// Franchise summary sidebar: GM, cups, grade, seasons archived, picks held.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::protocol::AppSnapshot;

pub fn render(frame: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let paragraph = Paragraph::new(summary_lines(snap))
        .block(Block::default().borders(Borders::ALL).title("Franchise"));
    frame.render_widget(paragraph, area);
}

fn summary_lines(snap: &AppSnapshot) -> Vec<Line<'static>> {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Gray));

    let cups_style = if snap.stanley_cups > 0 {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    vec![
        Line::from(vec![label(" GM:      "), Span::raw(snap.general_manager.clone())]),
        Line::from(vec![
            label(" Cups:    "),
            Span::styled(snap.stanley_cups.to_string(), cups_style),
        ]),
        Line::from(vec![label(" Grade:   "), Span::raw(grade_text(snap))]),
        Line::from(vec![
            label(" Seasons: "),
            Span::raw(snap.history.len().to_string()),
        ]),
        Line::from(vec![
            label(" Picks:   "),
            Span::raw(snap.picks.len().to_string()),
        ]),
    ]
}

/// "B (Good) 46.5", or "N/A" before any season is archived.
pub fn grade_text(snap: &AppSnapshot) -> String {
    match &snap.grade {
        Some(grade) => format!("{} {:.1}", grade.label, grade.score),
        None => "N/A".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::sample_snapshot;
    use rinkside_core::archive::FranchiseGrade;

    #[test]
    fn grade_text_without_history() {
        assert_eq!(grade_text(&AppSnapshot::default()), "N/A");
    }

    #[test]
    fn grade_text_with_grade() {
        let mut snap = sample_snapshot();
        snap.grade = Some(FranchiseGrade {
            score: 46.5,
            label: "B (Good)",
        });
        assert_eq!(grade_text(&snap), "B (Good) 46.5");
    }

    #[test]
    fn render_shows_cup_count() {
        let backend = ratatui::backend::TestBackend::new(32, 7);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut snap = sample_snapshot();
        snap.stanley_cups = 2;
        terminal
            .draw(|frame| render(frame, frame.area(), &snap))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Cups:    2"));
    }
}
