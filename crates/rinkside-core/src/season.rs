// Season progression: the only transitions that touch every roster at once.

use tracing::info;

use crate::archive::{ArchiveSource, SeasonSnapshot};
use crate::ledger::ROLLING_HORIZON_YEARS;
use crate::tracker::FranchiseTracker;

impl FranchiseTracker {
    /// Freeze the current season into a new snapshot and append it to the
    /// history. Live state is left untouched.
    pub fn archive_season(&mut self) {
        let nhl = self.nhl_team();
        let snapshot = SeasonSnapshot::capture(&ArchiveSource {
            season: self.current_season,
            cap_ceiling: self.cap_ceiling,
            nhl_roster: self.nhl_roster(),
            ahl_roster: self.ahl_roster(),
            team_stats: nhl.and_then(|t| t.stats_for(self.current_season)),
            awards: &self.league_awards,
            trades: &self.trades,
            draft_picks: &self.draft_history,
            future_picks: &self.future_draft_picks,
        });
        info!(
            "Archived season {}: {} players, cap hit {:.2}M",
            snapshot.season,
            snapshot.total_players(),
            snapshot.total_cap_hit
        );
        self.season_history.push(snapshot);
    }

    /// Close out the current season and move to the next.
    ///
    /// In order: archive, run every contract down one year, age every player,
    /// add a draft year at the far end of the pick horizon, then bump the
    /// season. Nothing in the sequence can fail.
    pub fn advance_season(&mut self) {
        let from = self.current_season;
        self.archive_season();
        self.decrement_contracts();
        self.age_players();
        self.extend_draft_ledger();
        self.current_season += 1;
        info!("Advanced season {} -> {}", from, self.current_season);
    }

    /// Archive the final season and mark the franchise finished. Rosters,
    /// contracts and the ledger are left exactly as they stand.
    ///
    /// Completion is a flag for the UI; `advance_season` does not check it.
    pub fn complete_franchise(&mut self) {
        self.archive_season();
        self.franchise_completed = true;
        self.franchise_completed_season = Some(self.current_season);
        info!("Franchise completed in season {}", self.current_season);
    }

    fn decrement_contracts(&mut self) {
        for player in self.rostered_players_mut() {
            if let Some(contract) = player.contract.as_mut() {
                contract.decrement_term();
            }
        }
    }

    fn age_players(&mut self) {
        for player in self.rostered_players_mut() {
            player.age += 1;
        }
    }

    fn extend_draft_ledger(&mut self) {
        let year = self.current_season + ROLLING_HORIZON_YEARS;
        let owner = self.nhl_team_name().to_string();
        self.future_draft_picks.generate_picks(year, 1, &owner);
    }
}
