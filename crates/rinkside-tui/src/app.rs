// Application state and command processing.
//
// The app task owns the franchise for the whole session. It applies
// `UserCommand`s from the TUI through the franchise's own operations and
// pushes a fresh `AppSnapshot` after each one.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use rinkside_core::config::Config;
use rinkside_core::import;
use rinkside_core::model::{League, Player, PlayerId};
use rinkside_core::persistence::{self, PersistenceError};
use rinkside_core::FranchiseTracker;

use crate::protocol::{AppSnapshot, CapView, RosterRow, SeasonRow, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

/// Load the saved franchise, or start the one described in the config.
///
/// A new franchise imports the configured roster sheet, if any. The
/// league cap limits from the config are applied either way.
pub fn load_or_create(config: &Config, base_dir: &Path) -> anyhow::Result<FranchiseTracker> {
    let save_path = config.save_path(base_dir);
    let mut tracker = if save_path.exists() {
        persistence::load(&save_path)
            .with_context(|| format!("failed to load save file {}", save_path.display()))?
    } else {
        let nf = &config.new_franchise;
        info!("No save at {}; starting a new franchise", save_path.display());
        let mut tracker = FranchiseTracker::new_franchise(
            &nf.nhl_team,
            &nf.ahl_team,
            &nf.general_manager,
            nf.start_season,
        );
        if let Some(csv) = config.roster_csv_path(base_dir) {
            let imported = import::import_roster_csv(&mut tracker, &csv)
                .with_context(|| format!("failed to import roster sheet {}", csv.display()))?;
            info!("Starting roster: {} players from {}", imported, csv.display());
        }
        tracker
    };
    tracker.set_cap_limits(config.league.cap_ceiling, config.league.cap_floor);
    Ok(tracker)
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub tracker: FranchiseTracker,
    pub save_path: PathBuf,
    /// Where `ExportRoster` writes its CSV and JSON files.
    pub export_dir: PathBuf,
    /// Set by every applied mutation, cleared by a successful save.
    pub dirty: bool,
}

impl AppState {
    /// A franchise with no save file yet starts out dirty.
    pub fn new(tracker: FranchiseTracker, save_path: PathBuf, export_dir: PathBuf) -> Self {
        let dirty = !save_path.exists();
        AppState {
            tracker,
            save_path,
            export_dir,
            dirty,
        }
    }

    pub fn from_config(config: &Config, base_dir: &Path) -> anyhow::Result<Self> {
        let tracker = load_or_create(config, base_dir)?;
        Ok(AppState::new(
            tracker,
            config.save_path(base_dir),
            base_dir.join("exports"),
        ))
    }

    /// Build the view the TUI renders.
    pub fn build_snapshot(&self) -> AppSnapshot {
        let t = &self.tracker;
        let season = t.current_season();

        let mut picks: Vec<_> = t
            .future_draft_picks()
            .iter()
            .filter(|p| p.year >= season)
            .cloned()
            .collect();
        picks.sort_by_key(|p| (p.year, p.round));

        let history = t
            .sorted_history()
            .into_iter()
            .map(|s| SeasonRow {
                season: s.season,
                record: s.team_stats.as_ref().map(|ts| ts.record()),
                points: s.team_stats.as_ref().map(|ts| ts.points),
                won_cup: s.won_stanley_cup(),
                cap_hit: s.total_cap_hit,
                players: s.total_players(),
            })
            .collect();

        AppSnapshot {
            nhl_team: t.nhl_team_name().to_string(),
            ahl_team: t.ahl_team_name().to_string(),
            general_manager: t.general_manager_name().to_string(),
            season,
            completed_season: t.completed_season(),
            nhl_roster: roster_rows(t.nhl_roster(), League::Nhl),
            ahl_roster: roster_rows(t.ahl_roster(), League::Ahl),
            cap: CapView {
                ceiling: t.cap_ceiling(),
                floor: t.cap_floor(),
                total: t.total_cap_hit(),
                space: t.cap_space(),
                below_floor: t.is_below_cap_floor(),
                by_position: t.cap_by_position(),
                expiring: t
                    .expiring_contracts(season)
                    .into_iter()
                    .map(|p| (p.full_name(), p.cap_hit()))
                    .collect(),
            },
            picks,
            history,
            stanley_cups: t.stanley_cup_count(),
            grade: t.franchise_grade(),
            leaders: t.all_time_leaders(),
            unsaved_changes: self.dirty,
        }
    }

    pub fn save(&mut self) -> Result<(), PersistenceError> {
        persistence::save(&self.tracker, &self.save_path)?;
        self.dirty = false;
        Ok(())
    }

    /// Apply one command. Returns the notice to show, if any.
    pub fn apply_command(&mut self, cmd: UserCommand) -> Option<String> {
        match cmd {
            UserCommand::CallUp(id) => {
                let name = self.player_name(id);
                if self.tracker.call_up_player_from_ahl(id) {
                    self.dirty = true;
                    Some(format!("Called up {name}"))
                } else {
                    Some(format!("{name} is not on the AHL roster"))
                }
            }
            UserCommand::SendDown(id) => {
                let name = self.player_name(id);
                if self.tracker.send_player_to_ahl(id) {
                    self.dirty = true;
                    Some(format!("Sent {name} to the AHL"))
                } else {
                    Some(format!("{name} is not on the NHL roster"))
                }
            }
            UserCommand::AdvanceSeason => {
                if self.tracker.is_completed() {
                    return Some("Franchise is complete; no more seasons".to_string());
                }
                self.tracker.advance_season();
                self.dirty = true;
                Some(format!("Now in season {}", self.tracker.current_season()))
            }
            UserCommand::CompleteFranchise => {
                if self.tracker.is_completed() {
                    return Some("Franchise is already complete".to_string());
                }
                self.tracker.complete_franchise();
                self.dirty = true;
                Some(format!(
                    "Franchise completed after season {}",
                    self.tracker.current_season()
                ))
            }
            UserCommand::Save => match self.save() {
                Ok(()) => Some(format!("Saved to {}", self.save_path.display())),
                Err(e) => {
                    error!("Save failed: {}", e);
                    Some(format!("Save failed: {e}"))
                }
            },
            UserCommand::ExportRoster => match self.export_rosters() {
                Ok(dir) => Some(format!("Rosters exported to {}", dir.display())),
                Err(e) => {
                    error!("Export failed: {:#}", e);
                    Some(format!("Export failed: {e:#}"))
                }
            },
            UserCommand::Quit => None,
        }
    }

    fn export_rosters(&self) -> anyhow::Result<&Path> {
        std::fs::create_dir_all(&self.export_dir)
            .with_context(|| format!("failed to create {}", self.export_dir.display()))?;
        import::export_roster_csv(&self.tracker, &self.export_dir.join("roster.csv"))?;
        import::export_roster_json(&self.tracker, &self.export_dir.join("roster.json"))?;
        Ok(&self.export_dir)
    }

    fn player_name(&self, id: PlayerId) -> String {
        self.tracker
            .player(id)
            .map(Player::full_name)
            .unwrap_or_else(|| format!("Player {id}"))
    }
}

fn roster_rows(roster: &[Player], league: League) -> Vec<RosterRow> {
    roster
        .iter()
        .map(|p| RosterRow {
            id: p.id,
            name: p.full_name(),
            position: p.position,
            age: p.age,
            overall: p.overall,
            potential: p.potential.map(|pot| pot.display_name()),
            cap_hit: p.cap_hit(),
            years_remaining: p.contract_years_remaining(),
            signed: p.contract.is_some(),
            league,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the app task until the TUI quits or drops its command sender.
///
/// Sends an initial snapshot, then a notice (when there is one) and a fresh
/// snapshot after every command. Unsaved changes are saved on quit.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");
    send_snapshot(&state, &ui_tx).await;

    loop {
        match cmd_rx.recv().await {
            Some(UserCommand::Quit) => {
                info!("Quit command received, shutting down");
                break;
            }
            Some(cmd) => {
                info!("Command: {:?}", cmd);
                if let Some(notice) = state.apply_command(cmd) {
                    let _ = ui_tx.send(UiUpdate::Notice(notice)).await;
                }
                send_snapshot(&state, &ui_tx).await;
            }
            None => {
                info!("Command channel closed, shutting down");
                break;
            }
        }
    }

    if state.dirty {
        if let Err(e) = state.save() {
            warn!("Could not save on exit: {}", e);
            return Err(e).context("failed to save franchise on exit");
        }
    }
    info!("Application event loop exiting");
    Ok(())
}

async fn send_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let snapshot = state.build_snapshot();
    let _ = ui_tx
        .send(UiUpdate::StateSnapshot(Box::new(snapshot)))
        .await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rinkside_core::config::{
        LeagueConfig, LoggingConfig, NewFranchiseConfig, StorageConfig,
    };
    use rinkside_core::model::{Contract, ContractStatus, Position};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rinkside_app_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn test_config() -> Config {
        Config {
            league: LeagueConfig {
                cap_ceiling: 90.0,
                cap_floor: 60.0,
            },
            new_franchise: NewFranchiseConfig {
                nhl_team: "Falcons".into(),
                ahl_team: "Falcons AHL".into(),
                general_manager: "Test GM".into(),
                start_season: 2025,
                roster_csv: None,
            },
            storage: StorageConfig {
                save_path: Some("saves/franchise.json".into()),
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Two NHL players and one AHL prospect.
    fn test_state(dir: &Path) -> (AppState, PlayerId, PlayerId) {
        let mut state = AppState::from_config(&test_config(), dir).unwrap();
        let star = state
            .tracker
            .add_player_to_nhl(
                Player::new("Connor", "Reed", Position::Center, 88, 27)
                    .with_contract(Contract::new(9.5, 1, 2024, ContractStatus::Ufa)),
            )
            .unwrap();
        state
            .tracker
            .add_player_to_nhl(Player::new("Leo", "Marsh", Position::LeftWing, 75, 24));
        let prospect = state
            .tracker
            .add_player_to_ahl(Player::new("Ivan", "Petrov", Position::Goalie, 60, 19))
            .unwrap();
        (state, star, prospect)
    }

    #[test]
    fn new_franchise_comes_from_config() {
        let dir = scratch_dir("from_config");
        let state = AppState::from_config(&test_config(), &dir).unwrap();
        assert_eq!(state.tracker.nhl_team_name(), "Falcons");
        assert_eq!(state.tracker.general_manager_name(), "Test GM");
        assert!((state.tracker.cap_ceiling() - 90.0).abs() < f64::EPSILON);
        assert!((state.tracker.cap_floor() - 60.0).abs() < f64::EPSILON);
        assert!(state.dirty);
        assert_eq!(state.save_path, dir.join("saves/franchise.json"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn new_franchise_imports_roster_sheet() {
        let dir = scratch_dir("roster_sheet");
        std::fs::write(
            dir.join("start.csv"),
            "League,FirstName,LastName,Position,Overall,Age,Potential,AAV,ContractYears,Status\n\
             NHL,Connor,Reed,C,88,27,ELITE,9.5,6,UFA\n",
        )
        .unwrap();
        let mut config = test_config();
        config.new_franchise.roster_csv = Some("start.csv".into());

        let state = AppState::from_config(&config, &dir).unwrap();
        assert_eq!(state.tracker.nhl_roster().len(), 1);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn existing_save_is_loaded_with_config_caps() {
        let dir = scratch_dir("existing_save");
        let (mut state, _, _) = test_state(&dir);
        state.tracker.advance_season();
        state.save().unwrap();
        assert!(!state.dirty);

        let mut config = test_config();
        config.league.cap_ceiling = 95.0;
        let reloaded = AppState::from_config(&config, &dir).unwrap();
        assert_eq!(reloaded.tracker.current_season(), 2026);
        assert_eq!(reloaded.tracker.nhl_roster().len(), 2);
        assert!((reloaded.tracker.cap_ceiling() - 95.0).abs() < f64::EPSILON);
        assert!(!reloaded.dirty);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn snapshot_reflects_franchise() {
        let dir = scratch_dir("snapshot");
        let (state, star, prospect) = test_state(&dir);
        let snap = state.build_snapshot();

        assert_eq!(snap.season, 2025);
        assert_eq!(snap.nhl_roster.len(), 2);
        assert_eq!(snap.ahl_roster[0].id, prospect);
        assert_eq!(snap.roster_len(), 3);
        assert!((snap.cap.total - 9.5).abs() < 1e-9);
        assert!((snap.cap.space - 80.5).abs() < 1e-9);
        assert!(snap.cap.below_floor);
        assert_eq!(snap.cap.expiring, vec![("Connor Reed".to_string(), 9.5)]);
        assert_eq!(snap.picks.len(), 42);
        assert_eq!(snap.picks[0].year, 2025);
        assert!(snap.history.is_empty());
        assert!(snap.grade.is_none());
        assert!(snap.nhl_roster.iter().any(|r| r.id == star && r.signed));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn roster_moves_go_through_the_tracker() {
        let dir = scratch_dir("moves");
        let (mut state, star, prospect) = test_state(&dir);
        state.dirty = false;

        let notice = state.apply_command(UserCommand::CallUp(prospect)).unwrap();
        assert_eq!(notice, "Called up Ivan Petrov");
        assert_eq!(state.tracker.nhl_roster().len(), 3);
        assert!(state.dirty);

        let notice = state.apply_command(UserCommand::CallUp(star)).unwrap();
        assert_eq!(notice, "Connor Reed is not on the AHL roster");

        state.apply_command(UserCommand::SendDown(star));
        assert_eq!(state.tracker.ahl_roster()[0].id, star);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn completed_franchise_refuses_to_advance() {
        let dir = scratch_dir("complete");
        let (mut state, _, _) = test_state(&dir);
        state.apply_command(UserCommand::AdvanceSeason);
        state.apply_command(UserCommand::CompleteFranchise);
        assert_eq!(state.tracker.completed_season(), Some(2026));

        let notice = state.apply_command(UserCommand::AdvanceSeason).unwrap();
        assert!(notice.contains("complete"));
        assert_eq!(state.tracker.current_season(), 2026);
        assert_eq!(state.build_snapshot().history.len(), 2);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_writes_csv_and_json() {
        let dir = scratch_dir("export");
        let (mut state, _, _) = test_state(&dir);
        let notice = state.apply_command(UserCommand::ExportRoster).unwrap();
        assert!(notice.starts_with("Rosters exported"));
        assert!(dir.join("exports/roster.csv").exists());
        assert!(dir.join("exports/roster.json").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn run_applies_commands_and_saves_on_quit() {
        let dir = scratch_dir("run_loop");
        let (state, _, prospect) = test_state(&dir);
        let save_path = state.save_path.clone();

        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, mut ui_rx) = mpsc::channel(64);
        let handle = tokio::spawn(run(cmd_rx, ui_tx, state));

        cmd_tx.send(UserCommand::CallUp(prospect)).await.unwrap();
        cmd_tx.send(UserCommand::AdvanceSeason).await.unwrap();
        cmd_tx.send(UserCommand::Quit).await.unwrap();
        handle.await.unwrap().unwrap();

        let mut notices = Vec::new();
        let mut last_snapshot = None;
        while let Some(update) = ui_rx.recv().await {
            match update {
                UiUpdate::Notice(n) => notices.push(n),
                UiUpdate::StateSnapshot(s) => last_snapshot = Some(s),
            }
        }
        assert_eq!(notices, vec!["Called up Ivan Petrov", "Now in season 2026"]);
        let snap = last_snapshot.unwrap();
        assert_eq!(snap.season, 2026);
        assert_eq!(snap.nhl_roster.len(), 3);

        let saved = persistence::load(&save_path).unwrap();
        assert_eq!(saved.current_season(), 2026);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
