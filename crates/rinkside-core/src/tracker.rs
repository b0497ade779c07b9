// Franchise aggregate: owns the teams, histories, cap limits, and pick ledger.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::archive::{self, DraftSuccessSummary, FranchiseGrade, LeaderLine, SeasonSnapshot};
use crate::cap::{self, PositionCapSummary};
use crate::ledger::{DraftPick, DraftPickLedger, ROLLING_HORIZON_YEARS};
use crate::model::{
    Award, AwardCategory, AwardType, Contract, ContractStatus, DraftInfo, DraftedPlayer, League,
    Lineup, Player, PlayerId, PlayerSeasonStats, Position, Team, TeamSeasonStats, Trade,
};

pub const DEFAULT_CAP_CEILING: f64 = 88.0;
pub const DEFAULT_CAP_FLOOR: f64 = 65.0;

fn default_cap_ceiling() -> f64 {
    DEFAULT_CAP_CEILING
}

fn default_cap_floor() -> f64 {
    DEFAULT_CAP_FLOOR
}

fn first_player_id() -> u32 {
    1
}

/// Positions of the two affiliates in `teams`. Derived from the team list,
/// never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TeamIndex {
    nhl: Option<usize>,
    ahl: Option<usize>,
}

/// The whole franchise: one save file's worth of state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FranchiseTracker {
    #[serde(default)]
    pub(crate) teams: Vec<Team>,
    #[serde(skip)]
    team_index: TeamIndex,
    #[serde(default)]
    pub(crate) current_season: u32,
    #[serde(default)]
    pub(crate) general_manager_name: String,
    /// Every selection the franchise has made, in recording order.
    #[serde(default)]
    pub(crate) draft_history: Vec<DraftedPlayer>,
    #[serde(default)]
    pub(crate) league_awards: Vec<Award>,
    #[serde(default)]
    pub(crate) trades: Vec<Trade>,
    #[serde(default = "default_cap_ceiling")]
    pub(crate) cap_ceiling: f64,
    #[serde(default = "default_cap_floor")]
    pub(crate) cap_floor: f64,
    #[serde(default)]
    pub(crate) future_draft_picks: DraftPickLedger,
    /// Append-only; one entry per archive call.
    #[serde(default)]
    pub(crate) season_history: Vec<SeasonSnapshot>,
    #[serde(default)]
    pub(crate) franchise_completed: bool,
    #[serde(default)]
    pub(crate) franchise_completed_season: Option<u32>,
    #[serde(default = "first_player_id")]
    next_player_id: u32,
}

impl FranchiseTracker {
    /// Start a new franchise: both affiliates with empty rosters and a full
    /// six-year pick ledger owned by the NHL club.
    pub fn new_franchise(
        nhl_team_name: &str,
        ahl_team_name: &str,
        general_manager_name: &str,
        start_season: u32,
    ) -> Self {
        let mut future_draft_picks = DraftPickLedger::new();
        future_draft_picks.generate_picks(start_season, ROLLING_HORIZON_YEARS, nhl_team_name);

        let tracker = FranchiseTracker {
            teams: vec![
                Team::new(nhl_team_name, League::Nhl),
                Team::new(ahl_team_name, League::Ahl),
            ],
            team_index: TeamIndex {
                nhl: Some(0),
                ahl: Some(1),
            },
            current_season: start_season,
            general_manager_name: general_manager_name.to_string(),
            draft_history: Vec::new(),
            league_awards: Vec::new(),
            trades: Vec::new(),
            cap_ceiling: DEFAULT_CAP_CEILING,
            cap_floor: DEFAULT_CAP_FLOOR,
            future_draft_picks,
            season_history: Vec::new(),
            franchise_completed: false,
            franchise_completed_season: None,
            next_player_id: first_player_id(),
        };
        info!(
            "New franchise: {} / {} (GM {}), season {}",
            nhl_team_name, ahl_team_name, general_manager_name, start_season
        );
        tracker
    }

    /// Rebuild the derived affiliate index from the team list.
    ///
    /// Must run after any full-state load. The last team carrying each league
    /// flag wins. A missing affiliate is recreated empty so that roster
    /// operations always have a target. Players saved without an id are
    /// given one, and the id counter is moved past every id in use.
    pub fn restore_team_references(&mut self) {
        let mut index = TeamIndex::default();
        for (i, team) in self.teams.iter().enumerate() {
            match team.league() {
                League::Nhl => index.nhl = Some(i),
                League::Ahl => index.ahl = Some(i),
            }
        }
        if index.nhl.is_none() {
            warn!("Save has no NHL team; creating an empty one");
            self.teams.push(Team::new("NHL Team", League::Nhl));
            index.nhl = Some(self.teams.len() - 1);
        }
        if index.ahl.is_none() {
            warn!("Save has no AHL team; creating an empty one");
            self.teams.push(Team::new("AHL Team", League::Ahl));
            index.ahl = Some(self.teams.len() - 1);
        }
        self.team_index = index;
        self.restore_player_ids();
    }

    fn restore_player_ids(&mut self) {
        let max_id = self
            .teams
            .iter()
            .flat_map(|t| t.roster.iter())
            .map(|p| p.id.0)
            .max()
            .unwrap_or(0);
        self.next_player_id = self.next_player_id.max(max_id + 1);

        let mut next = self.next_player_id;
        for player in self.teams.iter_mut().flat_map(|t| t.roster.iter_mut()) {
            if player.id == PlayerId::default() {
                player.id = PlayerId(next);
                next += 1;
            }
        }
        self.next_player_id = next;
    }

    /// Parse a saved franchise and rebuild its derived references.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tracker: FranchiseTracker = serde_json::from_str(json)?;
        tracker.restore_team_references();
        Ok(tracker)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn nhl_team(&self) -> Option<&Team> {
        self.team_index.nhl.and_then(|i| self.teams.get(i))
    }

    pub fn ahl_team(&self) -> Option<&Team> {
        self.team_index.ahl.and_then(|i| self.teams.get(i))
    }

    pub(crate) fn team_mut(&mut self, league: League) -> Option<&mut Team> {
        let idx = match league {
            League::Nhl => self.team_index.nhl,
            League::Ahl => self.team_index.ahl,
        };
        idx.and_then(|i| self.teams.get_mut(i))
    }

    /// The NHL club's name, or an empty string if there is none.
    pub fn nhl_team_name(&self) -> &str {
        self.nhl_team().map_or("", |t| t.name.as_str())
    }

    pub fn ahl_team_name(&self) -> &str {
        self.ahl_team().map_or("", |t| t.name.as_str())
    }

    pub fn nhl_roster(&self) -> &[Player] {
        self.nhl_team().map(|t| t.roster.as_slice()).unwrap_or(&[])
    }

    pub fn ahl_roster(&self) -> &[Player] {
        self.ahl_team().map(|t| t.roster.as_slice()).unwrap_or(&[])
    }

    /// The AHL roster.
    pub fn prospects(&self) -> &[Player] {
        self.ahl_roster()
    }

    /// NHL roster followed by AHL roster.
    pub fn all_players(&self) -> Vec<&Player> {
        self.nhl_roster().iter().chain(self.ahl_roster()).collect()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.all_players().into_iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.rostered_players_mut().find(|p| p.id == id)
    }

    /// Players on the NHL and AHL rosters. Other teams in the list (stale
    /// clubs from an edited save) are not rostered.
    pub(crate) fn rostered_players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        let (nhl, ahl) = (self.team_index.nhl, self.team_index.ahl);
        self.teams
            .iter_mut()
            .enumerate()
            .filter(move |(i, _)| Some(*i) == nhl || Some(*i) == ahl)
            .flat_map(|(_, t)| t.roster.iter_mut())
    }

    /// Which roster the player is on, if either.
    pub fn league_of(&self, id: PlayerId) -> Option<League> {
        if self.nhl_team().is_some_and(|t| t.contains(id)) {
            Some(League::Nhl)
        } else if self.ahl_team().is_some_and(|t| t.contains(id)) {
            Some(League::Ahl)
        } else {
            None
        }
    }

    /// First rostered player whose full name matches, case-insensitively.
    pub fn find_player_by_name(&self, full_name: &str) -> Option<&Player> {
        let wanted = full_name.trim().to_lowercase();
        self.all_players()
            .into_iter()
            .find(|p| p.full_name().to_lowercase() == wanted)
    }

    pub fn current_season(&self) -> u32 {
        self.current_season
    }

    pub fn general_manager_name(&self) -> &str {
        &self.general_manager_name
    }

    pub fn cap_ceiling(&self) -> f64 {
        self.cap_ceiling
    }

    pub fn cap_floor(&self) -> f64 {
        self.cap_floor
    }

    pub fn future_draft_picks(&self) -> &DraftPickLedger {
        &self.future_draft_picks
    }

    pub fn league_awards(&self) -> &[Award] {
        &self.league_awards
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Draft selections in the order they were recorded.
    pub fn drafted_players(&self) -> &[DraftedPlayer] {
        &self.draft_history
    }

    /// Archived seasons in the order they were archived.
    pub fn season_history(&self) -> &[SeasonSnapshot] {
        &self.season_history
    }

    pub fn is_completed(&self) -> bool {
        self.franchise_completed
    }

    pub fn completed_season(&self) -> Option<u32> {
        self.franchise_completed_season
    }

    // -----------------------------------------------------------------------
    // Roster moves
    // -----------------------------------------------------------------------

    fn allocate_id(&mut self) -> PlayerId {
        let id = PlayerId(self.next_player_id);
        self.next_player_id += 1;
        id
    }

    fn add_player(&mut self, league: League, mut player: Player) -> Option<PlayerId> {
        player.id = self.allocate_id();
        let id = player.id;
        let name = player.full_name();
        match self.team_mut(league) {
            Some(team) => {
                debug!("Added {} ({}) to {}", name, id, team.name);
                team.roster.push(player);
                Some(id)
            }
            None => {
                warn!("No {:?} team to add {} to", league, name);
                None
            }
        }
    }

    /// Add a new player to the NHL roster. The player receives a fresh id,
    /// which is returned.
    pub fn add_player_to_nhl(&mut self, player: Player) -> Option<PlayerId> {
        self.add_player(League::Nhl, player)
    }

    /// Add a new player to the AHL roster. The player receives a fresh id,
    /// which is returned.
    pub fn add_player_to_ahl(&mut self, player: Player) -> Option<PlayerId> {
        self.add_player(League::Ahl, player)
    }

    /// Remove a player from the NHL roster. `None` if not there.
    pub fn remove_player_from_nhl(&mut self, id: PlayerId) -> Option<Player> {
        self.team_mut(League::Nhl)?.take_player(id)
    }

    /// Remove a player from the AHL roster. `None` if not there.
    pub fn remove_player_from_ahl(&mut self, id: PlayerId) -> Option<Player> {
        self.team_mut(League::Ahl)?.take_player(id)
    }

    fn transfer(&mut self, id: PlayerId, from: League, to: League) -> bool {
        if self.team_mut(to).is_none() {
            return false;
        }
        let Some(player) = self.team_mut(from).and_then(|t| t.take_player(id)) else {
            warn!("Player {} is not on the {:?} roster; nothing moved", id, from);
            return false;
        };
        if let Some(team) = self.team_mut(to) {
            debug!("Moved {} to {}", player.full_name(), team.name);
            team.roster.push(player);
        }
        true
    }

    /// Move a player from the NHL roster to the AHL roster. Returns `false`
    /// and changes nothing if the player is not on the NHL roster.
    pub fn send_player_to_ahl(&mut self, id: PlayerId) -> bool {
        self.transfer(id, League::Nhl, League::Ahl)
    }

    /// Move a player from the AHL roster to the NHL roster. The first
    /// promotion of a drafted player marks the draft record as having made
    /// the NHL in the current season.
    pub fn call_up_player_from_ahl(&mut self, id: PlayerId) -> bool {
        if !self.transfer(id, League::Ahl, League::Nhl) {
            return false;
        }
        let season = self.current_season;
        for record in self.draft_history.iter_mut().filter(|d| d.player_id == id) {
            record.mark_made_nhl(season);
        }
        true
    }

    // -----------------------------------------------------------------------
    // Contracts, stats, lineup
    // -----------------------------------------------------------------------

    /// Replace the player's contract. `false` if the player is not rostered.
    pub fn set_contract(&mut self, id: PlayerId, contract: Contract) -> bool {
        match self.player_mut(id) {
            Some(player) => {
                player.contract = Some(contract);
                true
            }
            None => false,
        }
    }

    /// Remove and return the player's contract.
    pub fn clear_contract(&mut self, id: PlayerId) -> Option<Contract> {
        self.player_mut(id)?.contract.take()
    }

    /// Sign a drafted player to an RFA deal starting this season and flag the
    /// draft record as signed.
    pub fn sign_draftee(&mut self, id: PlayerId, aav: f64, term_in_years: u32) -> bool {
        let season = self.current_season;
        let contract = Contract::new(aav, term_in_years, season, ContractStatus::Rfa);
        if !self.set_contract(id, contract) {
            warn!("Cannot sign draftee {}: not on either roster", id);
            return false;
        }
        for record in self.draft_history.iter_mut().filter(|d| d.player_id == id) {
            record.mark_signed(season);
        }
        true
    }

    /// Upsert a stat line for the player. A year of 0 means the current season.
    pub fn record_player_stats(&mut self, id: PlayerId, mut stats: PlayerSeasonStats) -> bool {
        if stats.year == 0 {
            stats.year = self.current_season;
        }
        match self.player_mut(id) {
            Some(player) => {
                player.record_season_stats(stats);
                true
            }
            None => false,
        }
    }

    /// Upsert the NHL club's results for the current season.
    pub fn record_team_stats(&mut self, mut stats: TeamSeasonStats) {
        stats.year = self.current_season;
        if let Some(team) = self.team_mut(League::Nhl) {
            team.record_season_stats(stats);
        }
    }

    /// The NHL club's results for the current season, if entered.
    pub fn current_team_stats(&self) -> Option<&TeamSeasonStats> {
        self.nhl_team()?.stats_for(self.current_season)
    }

    pub fn set_cap_limits(&mut self, ceiling: f64, floor: f64) {
        self.cap_ceiling = ceiling;
        self.cap_floor = floor;
    }

    /// Set the NHL lineup. Ids not on the NHL roster, or placed in a group
    /// that does not match the player's position, are dropped. Duplicates
    /// keep their first slot.
    pub fn set_lineup(&mut self, lineup: Lineup) {
        let Some(team) = self.team_mut(League::Nhl) else {
            return;
        };
        let mut cleaned = Lineup::default();
        let groups: [(Vec<PlayerId>, &mut Vec<PlayerId>, fn(&Position) -> bool); 3] = [
            (lineup.forwards, &mut cleaned.forwards, Position::is_forward),
            (lineup.defense, &mut cleaned.defense, Position::is_defense),
            (lineup.goalies, &mut cleaned.goalies, Position::is_goalie),
        ];
        let mut seen = Vec::new();
        for (ids, slot, fits_group) in groups {
            for id in ids {
                let fits = team.player(id).is_some_and(|p| fits_group(&p.position));
                if fits && !seen.contains(&id) {
                    seen.push(id);
                    slot.push(id);
                }
            }
        }
        team.lineup = cleaned;
    }

    // -----------------------------------------------------------------------
    // Cap
    // -----------------------------------------------------------------------

    pub fn total_cap_hit(&self) -> f64 {
        cap::total_cap_hit(self.nhl_roster())
    }

    pub fn cap_space(&self) -> f64 {
        cap::cap_space(self.cap_ceiling, self.total_cap_hit())
    }

    pub fn is_below_cap_floor(&self) -> bool {
        cap::is_below_floor(self.cap_floor, self.total_cap_hit())
    }

    /// Players on either roster whose contract expires in `year`.
    pub fn expiring_contracts(&self, year: u32) -> Vec<&Player> {
        cap::expiring_contracts(self.all_players(), year)
    }

    pub fn cap_by_position(&self) -> Vec<PositionCapSummary> {
        cap::cap_by_position(self.nhl_roster())
    }

    // -----------------------------------------------------------------------
    // Records and draft picks
    // -----------------------------------------------------------------------

    /// Log a trade, stamped with the current season.
    pub fn record_trade(&mut self, mut trade: Trade) {
        trade.season = self.current_season;
        info!(
            "Trade with {}: received [{}], sent [{}]",
            trade.team2_name,
            trade.received_summary(),
            trade.sent_summary()
        );
        self.trades.push(trade);
    }

    /// Log an award, stamped with the current season. Team awards are also
    /// attached to the NHL club.
    pub fn record_award(&mut self, mut award: Award) {
        award.year = self.current_season;
        info!("{} awarded: {}", award.award, award.recipient.display_name());
        if award.award.category() == AwardCategory::Team {
            if let Some(team) = self.team_mut(League::Nhl) {
                team.awards.push(award.clone());
            }
        }
        self.league_awards.push(award);
    }

    /// Record a draft selection made this season.
    ///
    /// The player joins the AHL roster, the draft record is stamped with the
    /// current season, and the first ledger entry for (season, round) is
    /// consumed if present.
    pub fn record_draft_pick(
        &mut self,
        mut player: Player,
        round: u8,
        pick_overall: u32,
    ) -> Option<PlayerId> {
        let season = self.current_season;
        player.draft = Some(DraftInfo {
            year: season,
            round,
            overall_pick: pick_overall,
        });
        let id = self.add_player_to_ahl(player)?;
        let player = self.player(id)?;
        let record = DraftedPlayer::from_player(player, season, round, pick_overall);
        info!("Drafted {}", record.summary(&record.name_at_draft));
        self.draft_history.push(record);

        if self.future_draft_picks.consume_pick(season, round).is_none() {
            debug!("No {} round {} pick in the ledger to consume", season, round);
        }
        Some(id)
    }

    /// Picks held for `year`, by round.
    pub fn draft_picks_for_year(&self, year: u32) -> Vec<&DraftPick> {
        self.future_draft_picks.picks_for_year(year)
    }

    /// Add a pick acquired from `from_team`, owned by the NHL club.
    pub fn acquire_pick(&mut self, year: u32, round: u8, from_team: &str) {
        let owner = self.nhl_team_name().to_string();
        self.future_draft_picks
            .add_acquired_pick(year, round, from_team, &owner);
    }

    /// Give up the NHL club's first (year, round) pick. Returns the removed
    /// entry, or `None` if the club holds no such pick.
    pub fn trade_away_pick(&mut self, year: u32, round: u8, to_team: &str) -> Option<DraftPick> {
        let owner = self.nhl_team_name().to_string();
        let pick = self.future_draft_picks.remove_owned_pick(year, round, &owner);
        match &pick {
            Some(p) => debug!("Traded {} to {}", p.display_string(), to_team),
            None => warn!("No {} round {} pick owned by {} to trade", year, round, owner),
        }
        pick
    }

    pub fn unsigned_draftees(&self) -> Vec<&DraftedPlayer> {
        self.draft_history.iter().filter(|d| !d.signed).collect()
    }

    /// Draft history, newest draft first, then by round.
    pub fn draft_history(&self) -> Vec<&DraftedPlayer> {
        let mut history: Vec<&DraftedPlayer> = self.draft_history.iter().collect();
        history.sort_by(|a, b| {
            b.year
                .cmp(&a.year)
                .then(a.round.cmp(&b.round))
                .then(a.pick_overall.cmp(&b.pick_overall))
        });
        history
    }

    /// Current name of a drafted player, falling back to the name at draft
    /// time once they are off both rosters.
    pub fn drafted_display_name(&self, record: &DraftedPlayer) -> String {
        self.player(record.player_id)
            .map(Player::full_name)
            .unwrap_or_else(|| record.name_at_draft.clone())
    }

    // -----------------------------------------------------------------------
    // History queries
    // -----------------------------------------------------------------------

    pub fn stanley_cup_count(&self) -> usize {
        archive::stanley_cup_count(&self.season_history)
    }

    pub fn championship_seasons(&self) -> Vec<&SeasonSnapshot> {
        archive::championship_seasons(&self.season_history)
    }

    pub fn best_seasons_by_points(&self, n: usize) -> Vec<&SeasonSnapshot> {
        archive::best_seasons_by_points(&self.season_history, n)
    }

    pub fn best_seasons_by_wins(&self, n: usize) -> Vec<&SeasonSnapshot> {
        archive::best_seasons_by_wins(&self.season_history, n)
    }

    pub fn all_time_leaders(&self) -> Vec<LeaderLine> {
        archive::all_time_leaders(&self.season_history)
    }

    pub fn all_time_leaders_by_id(&self) -> Vec<LeaderLine> {
        archive::all_time_leaders_by_id(&self.season_history)
    }

    pub fn goal_leaders(&self, n: usize) -> Vec<LeaderLine> {
        archive::goal_leaders(&self.season_history, n)
    }

    pub fn franchise_grade(&self) -> Option<FranchiseGrade> {
        archive::franchise_grade(&self.season_history, self.league_awards.len())
    }

    pub fn award_history(&self) -> Vec<(AwardType, Vec<&Award>)> {
        archive::award_history(&self.league_awards)
    }

    pub fn trades_by_season(&self) -> Vec<(u32, Vec<&Trade>)> {
        archive::trades_by_season(&self.trades)
    }

    pub fn draft_success_summary(&self) -> DraftSuccessSummary {
        archive::draft_success_summary(&self.draft_history)
    }

    pub fn sorted_history(&self) -> Vec<&SeasonSnapshot> {
        archive::sorted_history(&self.season_history)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
