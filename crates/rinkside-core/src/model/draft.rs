// Historical draft selections.

use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId, Position, Potential, PotentialAccuracy};

/// "1st", "2nd", "3rd", "4th", ...
pub fn round_ordinal(round: u8) -> String {
    match round {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        n => format!("{n}th"),
    }
}

/// A player the franchise drafted.
///
/// The live player is owned by a roster; this record keeps only its id.
/// Rating, position, and potential are frozen at draft time and do not follow
/// the player's later development. After creation only the `signed` and
/// `made_nhl` flags (and their years) change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftedPlayer {
    pub year: u32,
    pub round: u8,
    pub pick_overall: u32,
    pub player_id: PlayerId,
    /// Name at draft time; used when the live player is no longer rostered.
    pub name_at_draft: String,
    pub overall_at_draft: u32,
    pub position: Position,
    #[serde(default)]
    pub potential_at_draft: Option<Potential>,
    #[serde(default)]
    pub potential_accuracy: Option<PotentialAccuracy>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub x_factors: Vec<String>,
    #[serde(default)]
    pub signed: bool,
    #[serde(default)]
    pub signed_year: Option<u32>,
    #[serde(default)]
    pub made_nhl: bool,
    #[serde(default)]
    pub nhl_debut_year: Option<u32>,
}

impl DraftedPlayer {
    /// Freeze the draft-day view of `player`. The player must already carry
    /// its roster id.
    pub fn from_player(player: &Player, year: u32, round: u8, pick_overall: u32) -> Self {
        DraftedPlayer {
            year,
            round,
            pick_overall,
            player_id: player.id,
            name_at_draft: player.full_name(),
            overall_at_draft: player.overall,
            position: player.position,
            potential_at_draft: player.potential,
            potential_accuracy: player.potential_accuracy,
            style: player.style.clone(),
            x_factors: player.x_factors.clone(),
            signed: player.contract.is_some(),
            signed_year: player.contract.as_ref().map(|_| year),
            made_nhl: false,
            nhl_debut_year: None,
        }
    }

    /// "2025 1st Round (#12): Name - CENTER OVR 70".
    pub fn summary(&self, display_name: &str) -> String {
        format!(
            "{} {} Round (#{}): {} - {} OVR {}",
            self.year,
            round_ordinal(self.round),
            self.pick_overall,
            display_name,
            self.position.token(),
            self.overall_at_draft
        )
    }

    pub(crate) fn mark_signed(&mut self, season: u32) {
        if !self.signed {
            self.signed = true;
            self.signed_year = Some(season);
        }
    }

    /// Flag the first promotion. Later call-ups keep the original debut year.
    pub(crate) fn mark_made_nhl(&mut self, season: u32) {
        if !self.made_nhl {
            self.made_nhl = true;
            self.nhl_debut_year = Some(season);
        }
    }
}
