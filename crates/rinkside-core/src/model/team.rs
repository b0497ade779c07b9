// Teams, lineups, and team season records.

use serde::{Deserialize, Serialize};

use super::award::Award;
use super::player::{Player, PlayerId};

/// Which tier a team plays in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum League {
    /// The top affiliate (NHL club).
    Nhl,
    /// The developmental affiliate (AHL club).
    Ahl,
}

/// One season of team results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamSeasonStats {
    pub year: u32,
    pub games_played: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub penalty_minutes: u32,
    pub wins: u32,
    pub losses: u32,
    pub overtime_losses: u32,
    pub points: u32,
    pub shutouts: u32,
}

impl TeamSeasonStats {
    /// "W-L-OTL".
    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.overtime_losses)
    }

    pub fn goal_differential(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

/// Line assignments for the top team, by player id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lineup {
    pub forwards: Vec<PlayerId>,
    pub defense: Vec<PlayerId>,
    pub goalies: Vec<PlayerId>,
}

impl Lineup {
    pub fn is_empty(&self) -> bool {
        self.forwards.is_empty() && self.defense.is_empty() && self.goalies.is_empty()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.forwards.contains(&id) || self.defense.contains(&id) || self.goalies.contains(&id)
    }

    pub(crate) fn remove(&mut self, id: PlayerId) {
        self.forwards.retain(|p| *p != id);
        self.defense.retain(|p| *p != id);
        self.goalies.retain(|p| *p != id);
    }
}

/// A club in the franchise: either the top affiliate or its feeder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    /// `true` for the developmental affiliate.
    #[serde(rename = "ahl", default)]
    pub is_ahl: bool,
    #[serde(default)]
    pub roster: Vec<Player>,
    #[serde(default)]
    pub awards: Vec<Award>,
    /// Team results, unique by year.
    #[serde(default)]
    pub season_stats: Vec<TeamSeasonStats>,
    #[serde(default)]
    pub lineup: Lineup,
}

impl Team {
    pub fn new(name: impl Into<String>, league: League) -> Self {
        Team {
            name: name.into(),
            is_ahl: league == League::Ahl,
            roster: Vec::new(),
            awards: Vec::new(),
            season_stats: Vec::new(),
            lineup: Lineup::default(),
        }
    }

    pub fn league(&self) -> League {
        if self.is_ahl {
            League::Ahl
        } else {
            League::Nhl
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.roster.iter_mut().find(|p| p.id == id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.roster.iter().any(|p| p.id == id)
    }

    /// Remove a player from the roster (and lineup). `None` if absent.
    pub(crate) fn take_player(&mut self, id: PlayerId) -> Option<Player> {
        let idx = self.roster.iter().position(|p| p.id == id)?;
        self.lineup.remove(id);
        Some(self.roster.remove(idx))
    }

    pub fn stats_for(&self, year: u32) -> Option<&TeamSeasonStats> {
        self.season_stats.iter().find(|s| s.year == year)
    }

    /// Insert or replace the results for `stats.year`.
    pub fn record_season_stats(&mut self, stats: TeamSeasonStats) {
        match self.season_stats.iter_mut().find(|s| s.year == stats.year) {
            Some(existing) => *existing = stats,
            None => {
                self.season_stats.push(stats);
                self.season_stats.sort_by_key(|s| s.year);
            }
        }
    }
}
