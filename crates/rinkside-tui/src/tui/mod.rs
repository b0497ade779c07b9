// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI keeps a `ViewState` holding the latest `AppSnapshot` plus purely
// local state (tab, selection, scroll, pending confirmation). The app task
// pushes `UiUpdate`s over an mpsc channel; the TUI re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::protocol::{AppSnapshot, RosterRow, TabId, UiUpdate, UserCommand};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ConfirmAction
// ---------------------------------------------------------------------------

/// Actions that need a y/n before they are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    AdvanceSeason,
    CompleteFranchise,
    Quit,
}

impl ConfirmAction {
    pub fn title(&self) -> &'static str {
        match self {
            ConfirmAction::AdvanceSeason => " Advance? ",
            ConfirmAction::CompleteFranchise => " Complete? ",
            ConfirmAction::Quit => " Quit? ",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            ConfirmAction::AdvanceSeason => "Archive and advance the season?",
            ConfirmAction::CompleteFranchise => "Archive and end the franchise?",
            ConfirmAction::Quit => "Really quit?",
        }
    }

    pub fn command(&self) -> UserCommand {
        match self {
            ConfirmAction::AdvanceSeason => UserCommand::AdvanceSeason,
            ConfirmAction::CompleteFranchise => UserCommand::CompleteFranchise,
            ConfirmAction::Quit => UserCommand::Quit,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state. The franchise data itself only arrives via snapshots.
pub struct ViewState {
    pub snapshot: AppSnapshot,
    pub active_tab: TabId,
    /// Index into `AppSnapshot::roster_rows`.
    pub selected: usize,
    /// Per-tab scroll offsets for the non-roster tabs.
    pub scroll_offset: HashMap<TabId, usize>,
    pub confirm: Option<ConfirmAction>,
    /// Latest notice from the app task, shown in the help bar.
    pub notice: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            snapshot: AppSnapshot::default(),
            active_tab: TabId::Roster,
            selected: 0,
            scroll_offset: HashMap::new(),
            confirm: None,
            notice: None,
        }
    }
}

impl ViewState {
    /// Replace the snapshot, keeping the selection in range.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        self.snapshot = snapshot;
        let len = self.snapshot.roster_len();
        self.selected = if len == 0 {
            0
        } else {
            self.selected.min(len - 1)
        };
    }

    pub fn selected_row(&self) -> Option<&RosterRow> {
        self.snapshot.roster_rows().nth(self.selected)
    }

    pub fn scroll(&self, tab: TabId) -> usize {
        self.scroll_offset.get(&tab).copied().unwrap_or(0)
    }
}

fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::StateSnapshot(snapshot) => state.apply_snapshot(*snapshot),
        UiUpdate::Notice(text) => state.notice = Some(text),
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    render_main_panel(frame, &layout, state);
    widgets::cap::render_summary(frame, layout.cap_summary, &state.snapshot.cap);
    widgets::franchise::render(frame, layout.franchise_summary, &state.snapshot);
    render_help_bar(frame, &layout, state);

    if let Some(action) = state.confirm {
        widgets::confirm::render(frame, frame.area(), action);
    }
}

fn render_main_panel(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let area = layout.main_panel;
    let snap = &state.snapshot;
    match state.active_tab {
        TabId::Roster => widgets::roster::render(frame, area, snap, state.selected),
        TabId::Cap => widgets::cap::render(frame, area, &snap.cap),
        TabId::DraftPicks => {
            widgets::draft_picks::render(frame, area, &snap.picks, state.scroll(TabId::DraftPicks))
        }
        TabId::History => {
            widgets::history::render(frame, area, &snap.history, state.scroll(TabId::History))
        }
        TabId::Leaders => {
            widgets::leaders::render(frame, area, &snap.leaders, state.scroll(TabId::Leaders))
        }
    }
}

const KEY_HINTS: &str =
    " q:Quit | 1-5:Tabs | j/k:Select | u:Call up | d:Send down | a:Advance | c:Complete | s:Save | e:Export";

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let line = match &state.notice {
        Some(notice) => Line::from(Span::styled(
            format!(" {notice}"),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(Span::styled(
            KEY_HINTS,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::DIM),
        )),
    };
    let paragraph = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits or the app task goes away.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // App task is gone.
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
