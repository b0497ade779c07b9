// Roster import/export: flat CSV sheets and JSON roster documents.
//
// Imports only ever add players through the aggregate's roster operations.

use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::model::{Contract, ContractStatus, Player, Position, Potential};
use crate::tracker::FranchiseTracker;

/// Header row written on export. Imports need the first ten columns;
/// `SigningYear` and `ContractLength` are optional.
pub const CSV_HEADER: [&str; 12] = [
    "League",
    "FirstName",
    "LastName",
    "Position",
    "Overall",
    "Age",
    "Potential",
    "AAV",
    "ContractYears",
    "Status",
    "SigningYear",
    "ContractLength",
];

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to access file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// One CSV row. Field names match the header columns; extra columns are
/// ignored.
#[derive(Debug, Serialize, Deserialize)]
#[allow(non_snake_case)]
struct RawRosterRow {
    League: String,
    FirstName: String,
    LastName: String,
    Position: String,
    Overall: u32,
    Age: u32,
    #[serde(default)]
    Potential: String,
    #[serde(default)]
    AAV: Option<f64>,
    #[serde(default)]
    ContractYears: Option<u32>,
    #[serde(default)]
    Status: String,
    /// With `ContractLength`, pins the contract's original terms so an
    /// export can be re-imported without re-signing it.
    #[serde(default)]
    SigningYear: Option<u32>,
    #[serde(default)]
    ContractLength: Option<u32>,
}

impl RawRosterRow {
    fn from_player(league: &str, player: &Player) -> Self {
        RawRosterRow {
            League: league.to_string(),
            FirstName: player.first_name.clone(),
            LastName: player.last_name.clone(),
            Position: player.position.token().to_string(),
            Overall: player.overall,
            Age: player.age,
            Potential: player
                .potential
                .map(|p| p.token().to_string())
                .unwrap_or_default(),
            AAV: Some(player.cap_hit()),
            ContractYears: Some(player.contract_years_remaining()),
            Status: player
                .contract
                .as_ref()
                .map(|c| c.status.to_string())
                .unwrap_or_default(),
            SigningYear: player.contract.as_ref().map(|c| c.signing_year),
            ContractLength: player
                .contract
                .as_ref()
                .map(|c| c.expiration_year() - c.signing_year),
        }
    }

    /// Build the player and say whether it belongs in the AHL. `None` when the
    /// position is not recognized.
    ///
    /// `ContractYears` is the remaining term. Without `SigningYear` and
    /// `ContractLength` the contract counts as signed in `current_season`
    /// for that many years.
    fn into_player(self, current_season: u32) -> Option<(Player, bool)> {
        let Some(position) = Position::from_str_pos(&self.Position) else {
            warn!(
                "skipping '{} {}': unknown position '{}'",
                self.FirstName, self.LastName, self.Position
            );
            return None;
        };
        let mut player =
            Player::new(self.FirstName, self.LastName, position, self.Overall, self.Age);

        if !self.Potential.trim().is_empty() {
            player.potential = Potential::from_token(&self.Potential);
            if player.potential.is_none() {
                warn!("unknown potential '{}' for {}", self.Potential, player.full_name());
            }
        }

        let aav = self.AAV.unwrap_or(0.0);
        let years = self.ContractYears.unwrap_or(0);
        if aav > 0.0 || years > 0 {
            let status = ContractStatus::from_token(&self.Status).unwrap_or(ContractStatus::Ufa);
            let contract = match (self.SigningYear, self.ContractLength) {
                (Some(signed), Some(length)) if length >= years => {
                    let mut contract = Contract::new(aav, length, signed, status);
                    contract.term_in_years = years;
                    contract
                }
                _ => Contract::new(aav, years, current_season, status),
            };
            player.contract = Some(contract);
        }

        let is_ahl = self.League.trim().eq_ignore_ascii_case("AHL");
        Some((player, is_ahl))
    }
}

/// Add every valid row to the matching roster. Returns how many players
/// were imported; malformed rows are skipped with a warning.
pub fn import_roster_csv_from_reader<R: Read>(
    tracker: &mut FranchiseTracker,
    rdr: R,
) -> Result<usize, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr);
    let current_season = tracker.current_season();
    let mut imported = 0;
    for result in reader.deserialize::<RawRosterRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed roster row: {}", e);
                continue;
            }
        };
        let Some((player, is_ahl)) = raw.into_player(current_season) else {
            continue;
        };
        let added = if is_ahl {
            tracker.add_player_to_ahl(player)
        } else {
            tracker.add_player_to_nhl(player)
        };
        if added.is_some() {
            imported += 1;
        }
    }
    Ok(imported)
}

pub fn import_roster_csv(
    tracker: &mut FranchiseTracker,
    path: &Path,
) -> Result<usize, ImportError> {
    let file = std::fs::File::open(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let imported = import_roster_csv_from_reader(tracker, file).map_err(|e| ImportError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    info!("Imported {} players from {}", imported, path.display());
    Ok(imported)
}

/// Write both rosters, NHL first, under [`CSV_HEADER`]. Contracts carry
/// their signing year and original length, so re-importing the sheet keeps
/// every expiration year.
pub fn export_roster_csv_to_writer<W: Write>(
    tracker: &FranchiseTracker,
    wtr: W,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(wtr);
    let rows = tracker
        .nhl_roster()
        .iter()
        .map(|p| RawRosterRow::from_player("NHL", p))
        .chain(
            tracker
                .ahl_roster()
                .iter()
                .map(|p| RawRosterRow::from_player("AHL", p)),
        );
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_roster_csv(tracker: &FranchiseTracker, path: &Path) -> Result<(), ImportError> {
    let file = std::fs::File::create(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    export_roster_csv_to_writer(tracker, file).map_err(|e| ImportError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    info!("Exported rosters to {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Both rosters as a standalone document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterExport {
    pub nhl_team: String,
    pub ahl_team: String,
    pub nhl_roster: Vec<Player>,
    pub ahl_roster: Vec<Player>,
}

impl RosterExport {
    pub fn from_tracker(tracker: &FranchiseTracker) -> Self {
        RosterExport {
            nhl_team: tracker.nhl_team_name().to_string(),
            ahl_team: tracker.ahl_team_name().to_string(),
            nhl_roster: tracker.nhl_roster().to_vec(),
            ahl_roster: tracker.ahl_roster().to_vec(),
        }
    }

    /// Add every player to the matching roster. Players get fresh ids; any
    /// id in the document is ignored.
    pub fn apply(self, tracker: &mut FranchiseTracker) -> usize {
        let nhl = self
            .nhl_roster
            .into_iter()
            .filter_map(|p| tracker.add_player_to_nhl(p))
            .count();
        let ahl = self
            .ahl_roster
            .into_iter()
            .filter_map(|p| tracker.add_player_to_ahl(p))
            .count();
        nhl + ahl
    }
}

pub fn export_roster_json(tracker: &FranchiseTracker, path: &Path) -> Result<(), ImportError> {
    let json = serde_json::to_string_pretty(&RosterExport::from_tracker(tracker)).map_err(|e| {
        ImportError::Json {
            path: path.display().to_string(),
            source: e,
        }
    })?;
    std::fs::write(path, json).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    info!("Exported roster JSON to {}", path.display());
    Ok(())
}

pub fn import_roster_json(
    tracker: &mut FranchiseTracker,
    path: &Path,
) -> Result<usize, ImportError> {
    let text = std::fs::read_to_string(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let export: RosterExport = serde_json::from_str(&text).map_err(|e| ImportError::Json {
        path: path.display().to_string(),
        source: e,
    })?;
    let imported = export.apply(tracker);
    info!("Imported {} players from {}", imported, path.display());
    Ok(imported)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
