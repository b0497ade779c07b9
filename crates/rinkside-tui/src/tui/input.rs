// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// task, or into local ViewState changes (tabs, selection, scroll, confirm).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rinkside_core::model::{League, PlayerId};

use super::{ConfirmAction, ViewState};
use crate::protocol::{TabId, UserCommand};

const PAGE_SIZE: usize = 20;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should go to the app task.
/// Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm on Windows reports both Press and Release.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if let Some(action) = view_state.confirm {
        return handle_confirm(key_event, view_state, action);
    }

    // Any other key dismisses the last notice.
    view_state.notice = None;

    match key_event.code {
        KeyCode::Char(c @ '1'..='5') => {
            let idx = (c as usize) - ('1' as usize);
            view_state.active_tab = TabId::ALL[idx];
            None
        }

        KeyCode::Up | KeyCode::Char('k') => {
            move_up(view_state, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            move_down(view_state, 1);
            None
        }
        KeyCode::PageUp => {
            move_up(view_state, PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            move_down(view_state, PAGE_SIZE);
            None
        }

        KeyCode::Char('u') => selected_in(view_state, League::Ahl).map(UserCommand::CallUp),
        KeyCode::Char('d') => selected_in(view_state, League::Nhl).map(UserCommand::SendDown),

        KeyCode::Char('a') => {
            ask_unless_completed(view_state, ConfirmAction::AdvanceSeason);
            None
        }
        KeyCode::Char('c') => {
            ask_unless_completed(view_state, ConfirmAction::CompleteFranchise);
            None
        }
        KeyCode::Char('s') => Some(UserCommand::Save),
        KeyCode::Char('e') => Some(UserCommand::ExportRoster),
        KeyCode::Char('q') => {
            view_state.confirm = Some(ConfirmAction::Quit);
            None
        }

        _ => None,
    }
}

/// `y` sends the pending action, `n`/Esc drops it, everything else is
/// blocked.
fn handle_confirm(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    action: ConfirmAction,
) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            view_state.confirm = None;
            Some(action.command())
        }
        KeyCode::Char('q') | KeyCode::Char('Q') if action == ConfirmAction::Quit => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm = None;
            None
        }
        _ => None,
    }
}

fn ask_unless_completed(view_state: &mut ViewState, action: ConfirmAction) {
    if let Some(season) = view_state.snapshot.completed_season {
        view_state.notice = Some(format!("Franchise was completed in {season}"));
    } else {
        view_state.confirm = Some(action);
    }
}

/// The selected player's id, if the roster tab is showing and the player
/// is on `league`'s roster.
fn selected_in(view_state: &ViewState, league: League) -> Option<PlayerId> {
    if view_state.active_tab != TabId::Roster {
        return None;
    }
    view_state
        .selected_row()
        .filter(|row| row.league == league)
        .map(|row| row.id)
}

fn move_up(view_state: &mut ViewState, lines: usize) {
    if view_state.active_tab == TabId::Roster {
        view_state.selected = view_state.selected.saturating_sub(lines);
    } else {
        let offset = view_state.scroll_offset.entry(view_state.active_tab).or_insert(0);
        *offset = offset.saturating_sub(lines);
    }
}

fn move_down(view_state: &mut ViewState, lines: usize) {
    if view_state.active_tab == TabId::Roster {
        let last = view_state.snapshot.roster_len().saturating_sub(1);
        view_state.selected = view_state.selected.saturating_add(lines).min(last);
    } else {
        let max = scroll_len(view_state).saturating_sub(1);
        let offset = view_state.scroll_offset.entry(view_state.active_tab).or_insert(0);
        *offset = offset.saturating_add(lines).min(max);
    }
}

/// Upper bound on the scroll offset of the active tab. Widgets clamp again
/// against their visible height.
fn scroll_len(view_state: &ViewState) -> usize {
    let snap = &view_state.snapshot;
    match view_state.active_tab {
        TabId::Roster => snap.roster_len(),
        TabId::Cap => 0,
        TabId::DraftPicks => {
            let mut years: Vec<u32> = snap.picks.iter().map(|p| p.year).collect();
            years.dedup();
            snap.picks.len() + years.len()
        }
        TabId::History => snap.history.len(),
        TabId::Leaders => snap.leaders.len(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::SeasonRow;
    use crate::tui::tests::sample_snapshot;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn loaded_state() -> ViewState {
        let mut state = ViewState::default();
        state.apply_snapshot(sample_snapshot());
        state
    }

    // -- Tabs --

    #[test]
    fn number_keys_switch_tabs() {
        let mut state = ViewState::default();
        for (c, tab) in ['1', '2', '3', '4', '5'].into_iter().zip(TabId::ALL) {
            assert!(handle_key(key(KeyCode::Char(c)), &mut state).is_none());
            assert_eq!(state.active_tab, tab);
        }
        handle_key(key(KeyCode::Char('6')), &mut state);
        assert_eq!(state.active_tab, TabId::Leaders);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = ViewState::default();
        let mut event = key(KeyCode::Char('2'));
        event.kind = KeyEventKind::Release;
        assert!(handle_key(event, &mut state).is_none());
        assert_eq!(state.active_tab, TabId::Roster);
    }

    // -- Selection and scrolling --

    #[test]
    fn selection_stays_within_roster() {
        let mut state = loaded_state();
        handle_key(key(KeyCode::Char('k')), &mut state);
        assert_eq!(state.selected, 0);
        handle_key(key(KeyCode::Char('j')), &mut state);
        handle_key(key(KeyCode::Down), &mut state);
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.selected, 2);
        handle_key(key(KeyCode::PageUp), &mut state);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn other_tabs_scroll_instead() {
        let mut state = loaded_state();
        let season = state.snapshot.history[0].clone();
        state.snapshot.history = (0..30)
            .map(|i| SeasonRow {
                season: 2000 + i,
                ..season.clone()
            })
            .collect();
        state.active_tab = TabId::History;
        handle_key(key(KeyCode::PageDown), &mut state);
        assert_eq!(state.scroll(TabId::History), PAGE_SIZE);
        handle_key(key(KeyCode::Up), &mut state);
        assert_eq!(state.scroll(TabId::History), PAGE_SIZE - 1);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn scroll_stops_at_last_row() {
        let mut state = loaded_state();
        state.active_tab = TabId::History;
        handle_key(key(KeyCode::PageDown), &mut state);
        // one archived season
        assert_eq!(state.scroll(TabId::History), 0);
        state.active_tab = TabId::Cap;
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.scroll(TabId::Cap), 0);
    }

    // -- Roster moves --

    #[test]
    fn call_up_only_for_ahl_players() {
        let mut state = loaded_state();
        assert!(handle_key(key(KeyCode::Char('u')), &mut state).is_none());
        state.selected = 2;
        assert_eq!(
            handle_key(key(KeyCode::Char('u')), &mut state),
            Some(UserCommand::CallUp(PlayerId(3)))
        );
    }

    #[test]
    fn send_down_only_for_nhl_players() {
        let mut state = loaded_state();
        state.selected = 1;
        assert_eq!(
            handle_key(key(KeyCode::Char('d')), &mut state),
            Some(UserCommand::SendDown(PlayerId(2)))
        );
        state.selected = 2;
        assert!(handle_key(key(KeyCode::Char('d')), &mut state).is_none());
    }

    #[test]
    fn roster_moves_need_the_roster_tab() {
        let mut state = loaded_state();
        state.selected = 2;
        state.active_tab = TabId::Cap;
        assert!(handle_key(key(KeyCode::Char('u')), &mut state).is_none());
    }

    // -- Confirmations --

    #[test]
    fn advance_requires_confirmation() {
        let mut state = loaded_state();
        assert!(handle_key(key(KeyCode::Char('a')), &mut state).is_none());
        assert_eq!(state.confirm, Some(ConfirmAction::AdvanceSeason));

        // Other keys are blocked while confirming.
        assert!(handle_key(key(KeyCode::Char('s')), &mut state).is_none());
        assert_eq!(state.confirm, Some(ConfirmAction::AdvanceSeason));

        assert_eq!(
            handle_key(key(KeyCode::Char('y')), &mut state),
            Some(UserCommand::AdvanceSeason)
        );
        assert!(state.confirm.is_none());
    }

    #[test]
    fn complete_can_be_cancelled() {
        let mut state = loaded_state();
        handle_key(key(KeyCode::Char('c')), &mut state);
        assert_eq!(state.confirm, Some(ConfirmAction::CompleteFranchise));
        assert!(handle_key(key(KeyCode::Esc), &mut state).is_none());
        assert!(state.confirm.is_none());
    }

    #[test]
    fn completed_franchise_offers_no_advance() {
        let mut state = loaded_state();
        state.snapshot.completed_season = Some(2030);
        handle_key(key(KeyCode::Char('a')), &mut state);
        assert!(state.confirm.is_none());
        assert_eq!(
            state.notice.as_deref(),
            Some("Franchise was completed in 2030")
        );
        handle_key(key(KeyCode::Char('c')), &mut state);
        assert!(state.confirm.is_none());
    }

    #[test]
    fn quit_confirms_with_y_or_q() {
        let mut state = ViewState::default();
        assert!(handle_key(key(KeyCode::Char('q')), &mut state).is_none());
        assert_eq!(state.confirm, Some(ConfirmAction::Quit));
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &mut state),
            Some(UserCommand::Quit)
        );

        let mut state = ViewState::default();
        handle_key(key(KeyCode::Char('q')), &mut state);
        handle_key(key(KeyCode::Char('n')), &mut state);
        assert!(state.confirm.is_none());
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut state = ViewState::default();
        state.confirm = Some(ConfirmAction::AdvanceSeason);
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    // -- Direct commands --

    #[test]
    fn save_and_export_are_sent_directly() {
        let mut state = ViewState::default();
        state.notice = Some("old".into());
        assert_eq!(
            handle_key(key(KeyCode::Char('s')), &mut state),
            Some(UserCommand::Save)
        );
        assert!(state.notice.is_none());
        assert_eq!(
            handle_key(key(KeyCode::Char('e')), &mut state),
            Some(UserCommand::ExportRoster)
        );
    }
}
