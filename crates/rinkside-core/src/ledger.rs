// Draft pick ledger: the rolling inventory of future selection rights.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::model::round_ordinal;

/// Rounds in every draft.
pub const ROUNDS_PER_DRAFT: u8 = 7;

/// How many drafts ahead the ledger is kept populated.
pub const ROLLING_HORIZON_YEARS: u32 = 6;

/// One future selection right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPick {
    pub year: u32,
    pub round: u8,
    /// Overall slot, once the draft order is known.
    #[serde(default)]
    pub pick_overall: Option<u32>,
    /// The club the pick originally belonged to.
    pub original_team: String,
    /// The club that holds the pick now.
    pub current_owner: String,
    #[serde(default)]
    pub was_traded: bool,
    /// Who we got it from, for acquired picks.
    #[serde(default)]
    pub traded_from: Option<String>,
}

impl DraftPick {
    /// An untraded pick held by its original team.
    pub fn own(year: u32, round: u8, team: &str) -> Self {
        DraftPick {
            year,
            round,
            pick_overall: None,
            original_team: team.to_string(),
            current_owner: team.to_string(),
            was_traded: false,
            traded_from: None,
        }
    }

    /// "2026 1st Round Pick", with " (from X)" for acquired picks.
    pub fn display_string(&self) -> String {
        let source = match (&self.traded_from, self.was_traded) {
            (Some(from), true) => format!(" (from {from})"),
            _ => String::new(),
        };
        format!(
            "{} {} Round Pick{}",
            self.year,
            round_ordinal(self.round),
            source
        )
    }
}

impl fmt::Display for DraftPick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_string())
    }
}

/// Ordered list of draft picks the franchise holds.
///
/// Entries are never deduplicated: if a pick has been traded away and a
/// different club's pick in the same slot acquired, both are separate entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftPickLedger {
    picks: Vec<DraftPick>,
}

impl DraftPickLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one pick per round for each of `year_span` years starting at
    /// `start_year`, all owned by `owner`.
    pub fn generate_picks(&mut self, start_year: u32, year_span: u32, owner: &str) {
        for year in start_year..start_year + year_span {
            for round in 1..=ROUNDS_PER_DRAFT {
                self.picks.push(DraftPick::own(year, round, owner));
            }
        }
        debug!(
            "Generated {} picks for {}..{} owned by {}",
            year_span * u32::from(ROUNDS_PER_DRAFT),
            start_year,
            start_year + year_span,
            owner
        );
    }

    /// All entries for `year`, ordered by round. Entries sharing a round keep
    /// ledger order.
    pub fn picks_for_year(&self, year: u32) -> Vec<&DraftPick> {
        let mut picks: Vec<&DraftPick> = self.picks.iter().filter(|p| p.year == year).collect();
        picks.sort_by_key(|p| p.round);
        picks
    }

    /// Append a pick acquired from another club.
    pub fn add_acquired_pick(&mut self, year: u32, round: u8, from_team: &str, to_owner: &str) {
        self.picks.push(DraftPick {
            year,
            round,
            pick_overall: None,
            original_team: from_team.to_string(),
            current_owner: to_owner.to_string(),
            was_traded: true,
            traded_from: Some(from_team.to_string()),
        });
    }

    /// Remove the first entry for (`year`, `round`). Returns it, or `None`
    /// (leaving the ledger untouched) when there is no such entry.
    pub fn consume_pick(&mut self, year: u32, round: u8) -> Option<DraftPick> {
        let idx = self
            .picks
            .iter()
            .position(|p| p.year == year && p.round == round)?;
        Some(self.picks.remove(idx))
    }

    /// Remove the first entry for (`year`, `round`) held by `owner`.
    pub fn remove_owned_pick(&mut self, year: u32, round: u8, owner: &str) -> Option<DraftPick> {
        let idx = self
            .picks
            .iter()
            .position(|p| p.year == year && p.round == round && p.current_owner == owner)?;
        Some(self.picks.remove(idx))
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<u32> {
        let mut years: Vec<u32> = self.picks.iter().map(|p| p.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    pub fn picks(&self) -> &[DraftPick] {
        &self.picks
    }

    pub fn iter(&self) -> impl Iterator<Item = &DraftPick> {
        self.picks.iter()
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_picks_fills_every_round() {
        let mut ledger = DraftPickLedger::new();
        ledger.generate_picks(2025, 6, "Falcons");
        assert_eq!(ledger.len(), 42);
        assert_eq!(ledger.years(), vec![2025, 2026, 2027, 2028, 2029, 2030]);
        assert!(ledger.iter().all(|p| {
            p.current_owner == "Falcons" && p.original_team == "Falcons" && !p.was_traded
        }));
    }

    #[test]
    fn picks_for_year_sorted_by_round() {
        let mut ledger = DraftPickLedger::new();
        ledger.add_acquired_pick(2026, 3, "Oilers", "Falcons");
        ledger.generate_picks(2026, 1, "Falcons");
        ledger.add_acquired_pick(2026, 1, "Kings", "Falcons");

        let picks = ledger.picks_for_year(2026);
        assert_eq!(picks.len(), 9);
        let rounds: Vec<u8> = picks.iter().map(|p| p.round).collect();
        assert_eq!(rounds, vec![1, 1, 2, 3, 3, 4, 5, 6, 7]);
        // Stable: the own 1st-rounder was inserted before the acquired one.
        assert!(!picks[0].was_traded);
        assert_eq!(picks[1].traded_from.as_deref(), Some("Kings"));
        // The acquired 3rd came first in the ledger.
        assert!(picks[3].was_traded);
    }

    #[test]
    fn consume_pick_removes_first_match_only() {
        let mut ledger = DraftPickLedger::new();
        ledger.generate_picks(2025, 1, "Falcons");
        ledger.add_acquired_pick(2025, 2, "Oilers", "Falcons");

        let consumed = ledger.consume_pick(2025, 2).unwrap();
        assert!(!consumed.was_traded);
        assert_eq!(ledger.len(), 7);
        let remaining = ledger.picks_for_year(2025);
        assert!(remaining.iter().any(|p| p.round == 2 && p.was_traded));
    }

    #[test]
    fn consume_pick_without_match_is_noop() {
        let mut empty = DraftPickLedger::new();
        assert!(empty.consume_pick(2025, 1).is_none());
        assert!(empty.is_empty());

        let mut ledger = DraftPickLedger::new();
        ledger.generate_picks(2025, 1, "Falcons");
        let before = ledger.clone();
        assert!(ledger.consume_pick(2031, 1).is_none());
        assert!(ledger.consume_pick(2025, 8).is_none());
        assert_eq!(ledger, before);
    }

    #[test]
    fn remove_owned_pick_respects_owner() {
        let mut ledger = DraftPickLedger::new();
        ledger.add_acquired_pick(2027, 1, "Oilers", "Kings");
        ledger.generate_picks(2027, 1, "Falcons");

        let removed = ledger.remove_owned_pick(2027, 1, "Falcons").unwrap();
        assert_eq!(removed.current_owner, "Falcons");
        assert!(ledger.remove_owned_pick(2027, 1, "Falcons").is_none());
        assert_eq!(ledger.picks_for_year(2027)[0].current_owner, "Kings");
    }

    #[test]
    fn display_string_shows_provenance() {
        assert_eq!(DraftPick::own(2026, 1, "Falcons").display_string(), "2026 1st Round Pick");
        let mut ledger = DraftPickLedger::new();
        ledger.add_acquired_pick(2027, 4, "Oilers", "Falcons");
        assert_eq!(
            ledger.picks()[0].to_string(),
            "2027 4th Round Pick (from Oilers)"
        );
    }

    #[test]
    fn ledger_serializes_as_plain_list() {
        let mut ledger = DraftPickLedger::new();
        ledger.generate_picks(2025, 1, "Falcons");
        let json = serde_json::to_value(&ledger).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 7);
    }
}
