// Messages between the app task and the TUI.
//
// The app task owns the franchise. The TUI only ever sees `AppSnapshot`
// views and asks for changes with `UserCommand`s.

use rinkside_core::archive::{FranchiseGrade, LeaderLine};
use rinkside_core::cap::PositionCapSummary;
use rinkside_core::model::{League, PlayerId, Position};
use rinkside_core::DraftPick;

/// Main panel tabs, in key order (`1`-`5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    Roster,
    Cap,
    DraftPicks,
    History,
    Leaders,
}

impl TabId {
    pub const ALL: [TabId; 5] = [
        TabId::Roster,
        TabId::Cap,
        TabId::DraftPicks,
        TabId::History,
        TabId::Leaders,
    ];
}

/// Requests from the TUI. Every mutation of the franchise goes through one.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    CallUp(PlayerId),
    SendDown(PlayerId),
    AdvanceSeason,
    CompleteFranchise,
    Save,
    ExportRoster,
    Quit,
}

/// Pushed from the app task to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    StateSnapshot(Box<AppSnapshot>),
    /// One-line message for the help bar ("Saved", errors).
    Notice(String),
}

/// One player row in the roster tab.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub age: u32,
    pub overall: u32,
    pub potential: Option<&'static str>,
    pub cap_hit: f64,
    pub years_remaining: u32,
    pub signed: bool,
    pub league: League,
}

/// One archived season in the history tab.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRow {
    pub season: u32,
    /// "W-L-OTL" when team results were recorded.
    pub record: Option<String>,
    pub points: Option<u32>,
    pub won_cup: bool,
    pub cap_hit: f64,
    pub players: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CapView {
    pub ceiling: f64,
    pub floor: f64,
    pub total: f64,
    pub space: f64,
    pub below_floor: bool,
    pub by_position: Vec<PositionCapSummary>,
    /// (name, AAV) for contracts ending this season.
    pub expiring: Vec<(String, f64)>,
}

/// Everything the TUI renders, rebuilt after every command.
#[derive(Debug, Clone, Default)]
pub struct AppSnapshot {
    pub nhl_team: String,
    pub ahl_team: String,
    pub general_manager: String,
    pub season: u32,
    pub completed_season: Option<u32>,
    pub nhl_roster: Vec<RosterRow>,
    pub ahl_roster: Vec<RosterRow>,
    pub cap: CapView,
    pub picks: Vec<DraftPick>,
    pub history: Vec<SeasonRow>,
    pub stanley_cups: usize,
    pub grade: Option<FranchiseGrade>,
    pub leaders: Vec<LeaderLine>,
    pub unsaved_changes: bool,
}

impl AppSnapshot {
    /// NHL rows followed by AHL rows; the roster tab's selection indexes this.
    pub fn roster_rows(&self) -> impl Iterator<Item = &RosterRow> {
        self.nhl_roster.iter().chain(self.ahl_roster.iter())
    }

    pub fn roster_len(&self) -> usize {
        self.nhl_roster.len() + self.ahl_roster.len()
    }

    pub fn is_completed(&self) -> bool {
        self.completed_season.is_some()
    }
}
