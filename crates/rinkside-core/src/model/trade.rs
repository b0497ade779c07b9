// Trade log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed trade. Assets are free-text descriptions
/// (e.g. "Evan Bouchard", "2027 2nd Round Pick").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Our club.
    pub team1_name: String,
    /// The trade partner.
    pub team2_name: String,
    /// Stamped by the aggregate when the trade is recorded.
    #[serde(default)]
    pub season: u32,
    pub trade_date: DateTime<Utc>,
    /// Assets we received.
    #[serde(default)]
    pub team1_receives: Vec<String>,
    /// Assets we sent.
    #[serde(default)]
    pub team2_receives: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Trade {
    /// New trade, timestamped now.
    pub fn new(team1_name: impl Into<String>, team2_name: impl Into<String>) -> Self {
        Trade {
            team1_name: team1_name.into(),
            team2_name: team2_name.into(),
            season: 0,
            trade_date: Utc::now(),
            team1_receives: Vec::new(),
            team2_receives: Vec::new(),
            notes: None,
        }
    }

    pub fn receiving(mut self, asset: impl Into<String>) -> Self {
        self.team1_receives.push(asset.into());
        self
    }

    pub fn sending(mut self, asset: impl Into<String>) -> Self {
        self.team2_receives.push(asset.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn received_summary(&self) -> String {
        self.team1_receives.join(", ")
    }

    pub fn sent_summary(&self) -> String {
        self.team2_receives.join(", ")
    }
}
