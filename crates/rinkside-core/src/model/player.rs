// Player identity, position/potential enums, and per-season stat lines.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::contract::Contract;

/// Stable identifier for a player within one franchise save.
///
/// Allocated by the aggregate when a player first joins a roster. Draft
/// records, player awards, and lineups refer to players by this id so that
/// later edits to the live player are visible through them.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Hockey playing positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    Center,
    LeftWing,
    RightWing,
    LeftDefense,
    RightDefense,
    Goalie,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::Center,
        Position::LeftWing,
        Position::RightWing,
        Position::LeftDefense,
        Position::RightDefense,
        Position::Goalie,
    ];

    /// Parse a position token.
    ///
    /// Accepts the save-file names (`CENTER`, `LEFT_WING`, ...) as well as the
    /// usual abbreviations (`C`, `LW`, `RW`, `LD`, `RD`, `G`). Case-insensitive.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "CENTER" | "C" => Some(Position::Center),
            "LEFT_WING" | "LW" => Some(Position::LeftWing),
            "RIGHT_WING" | "RW" => Some(Position::RightWing),
            "LEFT_DEFENSE" | "LD" => Some(Position::LeftDefense),
            "RIGHT_DEFENSE" | "RD" => Some(Position::RightDefense),
            "GOALIE" | "G" => Some(Position::Goalie),
            _ => None,
        }
    }

    /// Short display string.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Center => "C",
            Position::LeftWing => "LW",
            Position::RightWing => "RW",
            Position::LeftDefense => "LD",
            Position::RightDefense => "RD",
            Position::Goalie => "G",
        }
    }

    /// Save-file token (matches the serde representation).
    pub fn token(&self) -> &'static str {
        match self {
            Position::Center => "CENTER",
            Position::LeftWing => "LEFT_WING",
            Position::RightWing => "RIGHT_WING",
            Position::LeftDefense => "LEFT_DEFENSE",
            Position::RightDefense => "RIGHT_DEFENSE",
            Position::Goalie => "GOALIE",
        }
    }

    pub fn is_forward(&self) -> bool {
        matches!(
            self,
            Position::Center | Position::LeftWing | Position::RightWing
        )
    }

    pub fn is_defense(&self) -> bool {
        matches!(self, Position::LeftDefense | Position::RightDefense)
    }

    pub fn is_goalie(&self) -> bool {
        matches!(self, Position::Goalie)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Potential
// ---------------------------------------------------------------------------

/// Projected development ceiling. Skaters and goalies use separate tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Potential {
    Franchise,
    Elite,
    #[serde(rename = "TOP_6F")]
    Top6F,
    #[serde(rename = "TOP_4D")]
    Top4D,
    #[serde(rename = "TOP_9F")]
    Top9F,
    #[serde(rename = "TOP_6D")]
    Top6D,
    #[serde(rename = "BOTTOM_6F")]
    Bottom6F,
    BottomPairD,
    Ahl,
    #[serde(rename = "FRANCHISE_G")]
    FranchiseG,
    #[serde(rename = "ELITE_G")]
    EliteG,
    Starter,
    Backup,
    #[serde(rename = "AHL_G")]
    AhlG,
}

impl Potential {
    pub fn skater_tiers() -> &'static [Potential] {
        &[
            Potential::Franchise,
            Potential::Elite,
            Potential::Top6F,
            Potential::Top4D,
            Potential::Top9F,
            Potential::Top6D,
            Potential::Bottom6F,
            Potential::BottomPairD,
            Potential::Ahl,
        ]
    }

    pub fn goalie_tiers() -> &'static [Potential] {
        &[
            Potential::FranchiseG,
            Potential::EliteG,
            Potential::Starter,
            Potential::Backup,
            Potential::AhlG,
        ]
    }

    /// Tiers that make sense for a player at the given position.
    pub fn tiers_for(position: Position) -> &'static [Potential] {
        match position {
            Position::Goalie => Self::goalie_tiers(),
            _ => Self::skater_tiers(),
        }
    }

    /// Parse the import token (`FRANCHISE`, `TOP_6F`, `AHL_G`, ...).
    pub fn from_token(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "FRANCHISE" => Some(Potential::Franchise),
            "ELITE" => Some(Potential::Elite),
            "TOP_6F" => Some(Potential::Top6F),
            "TOP_4D" => Some(Potential::Top4D),
            "TOP_9F" => Some(Potential::Top9F),
            "TOP_6D" => Some(Potential::Top6D),
            "BOTTOM_6F" => Some(Potential::Bottom6F),
            "BOTTOM_PAIR_D" => Some(Potential::BottomPairD),
            "AHL" => Some(Potential::Ahl),
            "FRANCHISE_G" => Some(Potential::FranchiseG),
            "ELITE_G" => Some(Potential::EliteG),
            "STARTER" => Some(Potential::Starter),
            "BACKUP" => Some(Potential::Backup),
            "AHL_G" => Some(Potential::AhlG),
            _ => None,
        }
    }

    /// Import/export token; the inverse of [`Potential::from_token`].
    pub fn token(&self) -> &'static str {
        match self {
            Potential::Franchise => "FRANCHISE",
            Potential::Elite => "ELITE",
            Potential::Top6F => "TOP_6F",
            Potential::Top4D => "TOP_4D",
            Potential::Top9F => "TOP_9F",
            Potential::Top6D => "TOP_6D",
            Potential::Bottom6F => "BOTTOM_6F",
            Potential::BottomPairD => "BOTTOM_PAIR_D",
            Potential::Ahl => "AHL",
            Potential::FranchiseG => "FRANCHISE_G",
            Potential::EliteG => "ELITE_G",
            Potential::Starter => "STARTER",
            Potential::Backup => "BACKUP",
            Potential::AhlG => "AHL_G",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Potential::Franchise => "Franchise",
            Potential::Elite => "Elite",
            Potential::Top6F => "Top 6 Forward",
            Potential::Top4D => "Top 4 Defenseman",
            Potential::Top9F => "Top 9 Forward",
            Potential::Top6D => "Top 6 Defenseman",
            Potential::Bottom6F => "Bottom 6 Forward",
            Potential::BottomPairD => "Bottom Pair Defenseman",
            Potential::Ahl => "AHL",
            Potential::FranchiseG => "Franchise Goalie",
            Potential::EliteG => "Elite Goalie",
            Potential::Starter => "Starter",
            Potential::Backup => "Backup",
            Potential::AhlG => "AHL Goalie",
        }
    }
}

impl fmt::Display for Potential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Scouting confidence attached to a potential rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PotentialAccuracy {
    Exact,
    High,
    Medium,
    Low,
}

impl PotentialAccuracy {
    pub fn display_name(&self) -> &'static str {
        match self {
            PotentialAccuracy::Exact => "Exact",
            PotentialAccuracy::High => "High",
            PotentialAccuracy::Medium => "Med",
            PotentialAccuracy::Low => "Low",
        }
    }
}

// ---------------------------------------------------------------------------
// Season stats
// ---------------------------------------------------------------------------

/// League a stat line was recorded in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeagueLevel {
    #[default]
    Nhl,
    Ahl,
    Echl,
    Chl,
    Ncaa,
    Europe,
    Other,
}

impl LeagueLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            LeagueLevel::Nhl => "NHL",
            LeagueLevel::Ahl => "AHL",
            LeagueLevel::Echl => "ECHL",
            LeagueLevel::Chl => "CHL",
            LeagueLevel::Ncaa => "NCAA",
            LeagueLevel::Europe => "Europe",
            LeagueLevel::Other => "Other",
        }
    }
}

/// One season of a player's statistics. Skater and goalie columns share the
/// struct; which ones are meaningful depends on the player's position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSeasonStats {
    pub year: u32,
    pub league_level: LeagueLevel,
    pub games_played: u32,
    pub goals: u32,
    pub assists: u32,
    pub points: u32,
    pub plus_minus: i32,
    pub penalty_minutes: u32,
    pub wins: u32,
    pub losses: u32,
    pub overtime_losses: u32,
    pub shutouts: u32,
    pub save_percentage: f64,
    pub goals_against_average: f64,
    pub overall_at_end_of_season: u32,
}

impl PlayerSeasonStats {
    /// Skater line; points are derived from goals + assists.
    pub fn skater(year: u32, games_played: u32, goals: u32, assists: u32, plus_minus: i32) -> Self {
        PlayerSeasonStats {
            year,
            games_played,
            goals,
            assists,
            points: goals + assists,
            plus_minus,
            ..Default::default()
        }
    }

    pub fn goalie(
        year: u32,
        games_played: u32,
        wins: u32,
        losses: u32,
        overtime_losses: u32,
        save_percentage: f64,
        goals_against_average: f64,
    ) -> Self {
        PlayerSeasonStats {
            year,
            games_played,
            wins,
            losses,
            overtime_losses,
            save_percentage,
            goals_against_average,
            ..Default::default()
        }
    }

    /// Compact stat line for display, shaped by position.
    pub fn stat_line(&self, position: Position) -> String {
        match position {
            Position::Goalie => format!(
                "{} GP  {}-{}-{}  {:.3} SV%  {:.2} GAA",
                self.games_played,
                self.wins,
                self.losses,
                self.overtime_losses,
                self.save_percentage,
                self.goals_against_average
            ),
            _ => format!(
                "{} GP  {}G {}A {}P  {:+}",
                self.games_played, self.goals, self.assists, self.points, self.plus_minus
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// Where and when a player was drafted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftInfo {
    pub year: u32,
    pub round: u8,
    pub overall_pick: u32,
}

/// A player on one of the franchise's rosters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub position: Position,
    pub overall: u32,
    #[serde(default)]
    pub potential: Option<Potential>,
    #[serde(default)]
    pub potential_accuracy: Option<PotentialAccuracy>,
    /// Play style tag as shown in game, e.g. "Sniper".
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub x_factors: Vec<String>,
    /// One entry per season, unique by year.
    #[serde(default)]
    pub career_stats: Vec<PlayerSeasonStats>,
    #[serde(default)]
    pub contract: Option<Contract>,
    #[serde(default)]
    pub draft: Option<DraftInfo>,
}

impl Player {
    /// Create an unsigned player with no stats. The id is assigned when the
    /// player is added to a roster.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        position: Position,
        overall: u32,
        age: u32,
    ) -> Self {
        Player {
            id: PlayerId::default(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            position,
            overall,
            potential: None,
            potential_accuracy: None,
            style: None,
            x_factors: Vec::new(),
            career_stats: Vec::new(),
            contract: None,
            draft: None,
        }
    }

    pub fn with_contract(mut self, contract: Contract) -> Self {
        self.contract = Some(contract);
        self
    }

    pub fn with_potential(mut self, potential: Potential, accuracy: PotentialAccuracy) -> Self {
        self.potential = Some(potential);
        self.potential_accuracy = Some(accuracy);
        self
    }

    pub fn with_style(mut self, style: impl Into<String>, x_factors: &[&str]) -> Self {
        self.style = Some(style.into());
        self.x_factors = x_factors.iter().map(|x| x.to_string()).collect();
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_goalie(&self) -> bool {
        self.position.is_goalie()
    }

    /// Cap hit in millions; unsigned players count for nothing.
    pub fn cap_hit(&self) -> f64 {
        self.contract.as_ref().map_or(0.0, |c| c.aav)
    }

    pub fn contract_years_remaining(&self) -> u32 {
        self.contract.as_ref().map_or(0, |c| c.term_in_years)
    }

    /// Stats recorded for the given season, if any.
    pub fn stats_for(&self, year: u32) -> Option<&PlayerSeasonStats> {
        self.career_stats.iter().find(|s| s.year == year)
    }

    /// Insert or replace the stat line for `stats.year`.
    pub fn record_season_stats(&mut self, stats: PlayerSeasonStats) {
        match self.career_stats.iter_mut().find(|s| s.year == stats.year) {
            Some(existing) => *existing = stats,
            None => {
                self.career_stats.push(stats);
                self.career_stats.sort_by_key(|s| s.year);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
