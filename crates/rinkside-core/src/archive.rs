// Season snapshots and the read-only queries run over them.
//
// Snapshots are frozen copies: once appended to the history they are never
// mutated or re-derived from live state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::cap;
use crate::ledger::DraftPickLedger;
use crate::model::{
    Award, AwardType, ContractStatus, DraftedPlayer, Player, PlayerId, PlayerSeasonStats,
    Position, Potential, PotentialAccuracy, TeamSeasonStats, Trade,
};

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

/// A player as they stood when a season was archived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    #[serde(default)]
    pub player_id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub position: Position,
    pub overall: u32,
    #[serde(default)]
    pub potential: Option<Potential>,
    #[serde(default)]
    pub potential_accuracy: Option<PotentialAccuracy>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub x_factors: Vec<String>,
    /// 0.0 when unsigned.
    #[serde(default)]
    pub aav: f64,
    #[serde(default)]
    pub contract_years_remaining: u32,
    #[serde(default)]
    pub contract_status: Option<ContractStatus>,
    /// The player's line for the archived season, if one was entered.
    #[serde(default)]
    pub season_stats: Option<PlayerSeasonStats>,
}

impl PlayerSnapshot {
    pub fn from_player(player: &Player, season: u32) -> Self {
        PlayerSnapshot {
            player_id: player.id,
            first_name: player.first_name.clone(),
            last_name: player.last_name.clone(),
            age: player.age,
            position: player.position,
            overall: player.overall,
            potential: player.potential,
            potential_accuracy: player.potential_accuracy,
            style: player.style.clone(),
            x_factors: player.x_factors.clone(),
            aav: player.cap_hit(),
            contract_years_remaining: player.contract_years_remaining(),
            contract_status: player.contract.as_ref().map(|c| c.status),
            season_stats: player.stats_for(season).cloned(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The franchise at the end of one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSnapshot {
    pub season: u32,
    pub cap_ceiling: f64,
    /// Sum of NHL-roster cap hits at archive time.
    pub total_cap_hit: f64,
    #[serde(default)]
    pub nhl_roster: Vec<PlayerSnapshot>,
    #[serde(default)]
    pub ahl_roster: Vec<PlayerSnapshot>,
    #[serde(default)]
    pub team_stats: Option<TeamSeasonStats>,
    /// Only the awards, trades and draft selections dated to `season`.
    #[serde(default)]
    pub awards: Vec<Award>,
    #[serde(default)]
    pub trades: Vec<Trade>,
    #[serde(default)]
    pub draft_picks: Vec<DraftedPlayer>,
    /// The whole pick ledger as it stood, unfiltered.
    #[serde(default)]
    pub future_picks: DraftPickLedger,
}

/// Borrowed view of the live state a snapshot is built from.
pub struct ArchiveSource<'a> {
    pub season: u32,
    pub cap_ceiling: f64,
    pub nhl_roster: &'a [Player],
    pub ahl_roster: &'a [Player],
    pub team_stats: Option<&'a TeamSeasonStats>,
    pub awards: &'a [Award],
    pub trades: &'a [Trade],
    pub draft_picks: &'a [DraftedPlayer],
    pub future_picks: &'a DraftPickLedger,
}

impl SeasonSnapshot {
    /// Freeze `source` into a new snapshot. Franchise-wide lists are filtered
    /// to the source season; the cap total is recomputed from the NHL roster.
    pub fn capture(source: &ArchiveSource<'_>) -> Self {
        let season = source.season;
        SeasonSnapshot {
            season,
            cap_ceiling: source.cap_ceiling,
            total_cap_hit: cap::total_cap_hit(source.nhl_roster),
            nhl_roster: source
                .nhl_roster
                .iter()
                .map(|p| PlayerSnapshot::from_player(p, season))
                .collect(),
            ahl_roster: source
                .ahl_roster
                .iter()
                .map(|p| PlayerSnapshot::from_player(p, season))
                .collect(),
            team_stats: source.team_stats.filter(|s| s.year == season).cloned(),
            awards: source
                .awards
                .iter()
                .filter(|a| a.year == season)
                .cloned()
                .collect(),
            trades: source
                .trades
                .iter()
                .filter(|t| t.season == season)
                .cloned()
                .collect(),
            draft_picks: source
                .draft_picks
                .iter()
                .filter(|d| d.year == season)
                .cloned()
                .collect(),
            future_picks: source.future_picks.clone(),
        }
    }

    pub fn wins(&self) -> u32 {
        self.team_stats.as_ref().map_or(0, |s| s.wins)
    }

    pub fn points(&self) -> u32 {
        self.team_stats.as_ref().map_or(0, |s| s.points)
    }

    pub fn won_stanley_cup(&self) -> bool {
        self.awards.iter().any(|a| a.award == AwardType::StanleyCup)
    }

    pub fn total_players(&self) -> usize {
        self.nhl_roster.len() + self.ahl_roster.len()
    }

    pub fn cap_space(&self) -> f64 {
        cap::cap_space(self.cap_ceiling, self.total_cap_hit)
    }
}

// ---------------------------------------------------------------------------
// History queries
// ---------------------------------------------------------------------------

/// Career totals accumulated over archived NHL seasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderLine {
    pub name: String,
    /// Set by the id-keyed fold; `None` for the name-keyed one.
    pub player_id: Option<PlayerId>,
    pub seasons: u32,
    pub games_played: u32,
    pub goals: u32,
    pub assists: u32,
    pub points: u32,
}

impl LeaderLine {
    fn new(name: String, player_id: Option<PlayerId>) -> Self {
        LeaderLine {
            name,
            player_id,
            seasons: 0,
            games_played: 0,
            goals: 0,
            assists: 0,
            points: 0,
        }
    }

    fn add(&mut self, stats: &PlayerSeasonStats) {
        self.seasons += 1;
        self.games_played += stats.games_played;
        self.goals += stats.goals;
        self.assists += stats.assists;
        self.points += stats.points;
    }
}

/// Letter grade for a franchise run.
#[derive(Debug, Clone, PartialEq)]
pub struct FranchiseGrade {
    pub score: f64,
    pub label: &'static str,
}

/// Counts for the draft-success view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftSuccessSummary {
    pub total: usize,
    pub signed: usize,
    pub made_nhl: usize,
    pub first_rounders: usize,
}

impl DraftSuccessSummary {
    /// Share of picks that reached the NHL, as a percentage.
    pub fn nhl_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.made_nhl as f64 * 100.0 / self.total as f64
        }
    }
}

/// Snapshots ordered by season. The stored history is append-only and may
/// hold more than one snapshot per season.
pub fn sorted_history(history: &[SeasonSnapshot]) -> Vec<&SeasonSnapshot> {
    let mut sorted: Vec<&SeasonSnapshot> = history.iter().collect();
    sorted.sort_by_key(|s| s.season);
    sorted
}

pub fn stanley_cup_count(history: &[SeasonSnapshot]) -> usize {
    history.iter().filter(|s| s.won_stanley_cup()).count()
}

/// Cup-winning seasons, oldest first.
pub fn championship_seasons(history: &[SeasonSnapshot]) -> Vec<&SeasonSnapshot> {
    let mut cups: Vec<&SeasonSnapshot> = history.iter().filter(|s| s.won_stanley_cup()).collect();
    cups.sort_by_key(|s| s.season);
    cups
}

/// Top `n` seasons with team stats, by standings points.
pub fn best_seasons_by_points(history: &[SeasonSnapshot], n: usize) -> Vec<&SeasonSnapshot> {
    best_seasons_by(history, n, SeasonSnapshot::points)
}

/// Top `n` seasons with team stats, by wins.
pub fn best_seasons_by_wins(history: &[SeasonSnapshot], n: usize) -> Vec<&SeasonSnapshot> {
    best_seasons_by(history, n, SeasonSnapshot::wins)
}

fn best_seasons_by(
    history: &[SeasonSnapshot],
    n: usize,
    key: fn(&SeasonSnapshot) -> u32,
) -> Vec<&SeasonSnapshot> {
    let mut seasons: Vec<&SeasonSnapshot> =
        history.iter().filter(|s| s.team_stats.is_some()).collect();
    seasons.sort_by(|a, b| key(b).cmp(&key(a)).then(a.season.cmp(&b.season)));
    seasons.truncate(n);
    seasons
}

/// Career NHL totals keyed by full name.
///
/// Two different players sharing a name are folded into one line; see
/// [`all_time_leaders_by_id`] for the identity-keyed fold.
pub fn all_time_leaders(history: &[SeasonSnapshot]) -> Vec<LeaderLine> {
    let mut totals: HashMap<String, LeaderLine> = HashMap::new();
    for snapshot in history {
        for player in &snapshot.nhl_roster {
            if let Some(stats) = &player.season_stats {
                let name = player.full_name();
                totals
                    .entry(name.clone())
                    .or_insert_with(|| LeaderLine::new(name, None))
                    .add(stats);
            }
        }
    }
    sort_leaders(totals.into_values().collect())
}

/// Career NHL totals keyed by player id. The line carries the most recent
/// name the player was archived under.
pub fn all_time_leaders_by_id(history: &[SeasonSnapshot]) -> Vec<LeaderLine> {
    let mut totals: HashMap<PlayerId, LeaderLine> = HashMap::new();
    for snapshot in sorted_history(history) {
        for player in &snapshot.nhl_roster {
            if let Some(stats) = &player.season_stats {
                let line = totals
                    .entry(player.player_id)
                    .or_insert_with(|| LeaderLine::new(String::new(), Some(player.player_id)));
                line.name = player.full_name();
                line.add(stats);
            }
        }
    }
    sort_leaders(totals.into_values().collect())
}

/// Top `n` career goal scorers (name-keyed).
pub fn goal_leaders(history: &[SeasonSnapshot], n: usize) -> Vec<LeaderLine> {
    let mut leaders = all_time_leaders(history);
    leaders.sort_by(|a, b| b.goals.cmp(&a.goals).then_with(|| a.name.cmp(&b.name)));
    leaders.truncate(n);
    leaders
}

fn sort_leaders(mut leaders: Vec<LeaderLine>) -> Vec<LeaderLine> {
    leaders.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.name.cmp(&b.name)));
    leaders
}

/// Grade the run. `None` when nothing has been archived yet.
///
/// Score is 20 per cup, half the average wins per archived season, and 2 per
/// recorded league award.
pub fn franchise_grade(
    history: &[SeasonSnapshot],
    league_award_count: usize,
) -> Option<FranchiseGrade> {
    if history.is_empty() {
        return None;
    }
    let seasons = history.len() as f64;
    let total_wins: u32 = history.iter().map(SeasonSnapshot::wins).sum();
    let avg_wins = f64::from(total_wins) / seasons;
    let cups = stanley_cup_count(history) as f64;

    let score = cups * 20.0 + avg_wins * 0.5 + league_award_count as f64 * 2.0;
    Some(FranchiseGrade {
        score,
        label: grade_label(score),
    })
}

fn grade_label(score: f64) -> &'static str {
    match score {
        s if s >= 100.0 => "S+ (Dynasty)",
        s if s >= 80.0 => "S (Legendary)",
        s if s >= 60.0 => "A (Excellent)",
        s if s >= 45.0 => "B (Good)",
        s if s >= 30.0 => "C (Average)",
        s if s >= 15.0 => "D (Below Average)",
        _ => "F (Poor)",
    }
}

/// Awards grouped by type in declaration order, each group oldest first.
/// Types never won are left out.
pub fn award_history(awards: &[Award]) -> Vec<(AwardType, Vec<&Award>)> {
    AwardType::ALL
        .iter()
        .filter_map(|&award_type| {
            let mut won: Vec<&Award> = awards.iter().filter(|a| a.award == award_type).collect();
            if won.is_empty() {
                return None;
            }
            won.sort_by_key(|a| a.year);
            Some((award_type, won))
        })
        .collect()
}

/// Trades grouped by season, newest season first.
pub fn trades_by_season(trades: &[Trade]) -> Vec<(u32, Vec<&Trade>)> {
    let mut seasons: Vec<u32> = trades.iter().map(|t| t.season).collect();
    seasons.sort_unstable_by(|a, b| b.cmp(a));
    seasons.dedup();
    seasons
        .into_iter()
        .map(|season| {
            (
                season,
                trades.iter().filter(|t| t.season == season).collect(),
            )
        })
        .collect()
}

pub fn draft_success_summary(draft_history: &[DraftedPlayer]) -> DraftSuccessSummary {
    DraftSuccessSummary {
        total: draft_history.len(),
        signed: draft_history.iter().filter(|d| d.signed).count(),
        made_nhl: draft_history.iter().filter(|d| d.made_nhl).count(),
        first_rounders: draft_history.iter().filter(|d| d.round == 1).count(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contract, ContractStatus};

    fn skater(id: u32, first: &str, last: &str, season: u32, g: u32, a: u32) -> Player {
        let mut p = Player::new(first, last, Position::Center, 80, 25)
            .with_contract(Contract::new(4.0, 3, season, ContractStatus::Ufa));
        p.id = PlayerId(id);
        p.record_season_stats(PlayerSeasonStats::skater(season, 82, g, a, 0));
        p
    }

    fn snapshot(season: u32, nhl: &[Player], wins: u32, points: u32, cup: bool) -> SeasonSnapshot {
        let stats = TeamSeasonStats {
            year: season,
            wins,
            points,
            ..Default::default()
        };
        let mut awards = Vec::new();
        if cup {
            let mut award = Award::team(AwardType::StanleyCup, "Falcons");
            award.year = season;
            awards.push(award);
        }
        let ledger = DraftPickLedger::new();
        SeasonSnapshot::capture(&ArchiveSource {
            season,
            cap_ceiling: 88.0,
            nhl_roster: nhl,
            ahl_roster: &[],
            team_stats: Some(&stats),
            awards: &awards,
            trades: &[],
            draft_picks: &[],
            future_picks: &ledger,
        })
    }

    #[test]
    fn player_snapshot_is_a_frozen_copy() {
        let mut player = skater(1, "Zach", "Hyman", 2025, 40, 30);
        let snap = PlayerSnapshot::from_player(&player, 2025);

        player.overall = 60;
        player.contract = None;
        player.record_season_stats(PlayerSeasonStats::skater(2025, 10, 1, 1, 0));

        assert_eq!(snap.overall, 80);
        assert!((snap.aav - 4.0).abs() < 1e-9);
        assert_eq!(snap.contract_status, Some(ContractStatus::Ufa));
        assert_eq!(snap.season_stats.as_ref().unwrap().goals, 40);
    }

    #[test]
    fn player_snapshot_copies_style_tags() {
        let mut player =
            skater(1, "Zach", "Hyman", 2025, 40, 30).with_style("Power Forward", &["Net Front"]);
        let snap = PlayerSnapshot::from_player(&player, 2025);

        player.style = Some("Sniper".into());
        player.x_factors.clear();

        assert_eq!(snap.style.as_deref(), Some("Power Forward"));
        assert_eq!(snap.x_factors, vec!["Net Front".to_string()]);
    }

    #[test]
    fn snapshot_without_style_tags_still_loads() {
        let json = r#"{"first_name":"Zach","last_name":"Hyman","age":28,"position":"CENTER","overall":80}"#;
        let snap: PlayerSnapshot = serde_json::from_str(json).unwrap();
        assert!(snap.style.is_none());
        assert!(snap.x_factors.is_empty());
    }

    #[test]
    fn player_snapshot_without_stats_for_season() {
        let player = skater(1, "Zach", "Hyman", 2025, 40, 30);
        assert!(PlayerSnapshot::from_player(&player, 2026).season_stats.is_none());
    }

    #[test]
    fn capture_filters_to_season_but_copies_whole_ledger() {
        let mut awards = vec![
            Award::team(AwardType::StanleyCup, "Falcons"),
            Award::team(AwardType::PresidentsTrophy, "Falcons"),
        ];
        awards[0].year = 2025;
        awards[1].year = 2024;
        let mut trades = vec![Trade::new("Falcons", "Oilers"), Trade::new("Falcons", "Kings")];
        trades[0].season = 2025;
        trades[1].season = 2026;
        let mut ledger = DraftPickLedger::new();
        ledger.generate_picks(2025, 6, "Falcons");
        let nhl = vec![skater(1, "A", "One", 2025, 10, 10), skater(2, "B", "Two", 2025, 5, 5)];
        let stale_stats = TeamSeasonStats {
            year: 2024,
            wins: 50,
            ..Default::default()
        };

        let snap = SeasonSnapshot::capture(&ArchiveSource {
            season: 2025,
            cap_ceiling: 88.0,
            nhl_roster: &nhl,
            ahl_roster: &[],
            team_stats: Some(&stale_stats),
            awards: &awards,
            trades: &trades,
            draft_picks: &[],
            future_picks: &ledger,
        });

        assert_eq!(snap.awards.len(), 1);
        assert!(snap.won_stanley_cup());
        assert_eq!(snap.trades.len(), 1);
        assert_eq!(snap.trades[0].team2_name, "Oilers");
        assert_eq!(snap.future_picks.len(), 42);
        assert!((snap.total_cap_hit - 8.0).abs() < 1e-9);
        assert!((snap.cap_space() - 80.0).abs() < 1e-9);
        assert!(snap.team_stats.is_none());
        assert_eq!(snap.total_players(), 2);
    }

    #[test]
    fn name_keyed_leaders_merge_namesakes() {
        let s1 = snapshot(2025, &[skater(1, "Sebastian", "Aho", 2025, 30, 40)], 45, 100, false);
        let s2 = snapshot(2026, &[skater(2, "Sebastian", "Aho", 2026, 10, 10)], 40, 90, false);
        let history = vec![s1, s2];

        let by_name = all_time_leaders(&history);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].points, 90);
        assert_eq!(by_name[0].seasons, 2);

        let by_id = all_time_leaders_by_id(&history);
        assert_eq!(by_id.len(), 2);
        assert_eq!(by_id[0].player_id, Some(PlayerId(1)));
        assert_eq!(by_id[0].points, 70);
    }

    #[test]
    fn goal_leaders_sorted_and_truncated() {
        let nhl = vec![
            skater(1, "A", "Sniper", 2025, 50, 10),
            skater(2, "B", "Playmaker", 2025, 10, 70),
            skater(3, "C", "Grinder", 2025, 5, 5),
        ];
        let history = vec![snapshot(2025, &nhl, 40, 90, false)];
        let leaders = goal_leaders(&history, 2);
        assert_eq!(leaders.len(), 2);
        assert_eq!(leaders[0].name, "A Sniper");
        assert_eq!(leaders[1].name, "B Playmaker");

        let by_points = all_time_leaders(&history);
        assert_eq!(by_points[0].name, "B Playmaker");
    }

    #[test]
    fn best_seasons_and_championships() {
        let history = vec![
            snapshot(2027, &[], 50, 110, true),
            snapshot(2025, &[], 30, 70, true),
            snapshot(2026, &[], 45, 100, false),
        ];
        let by_points = best_seasons_by_points(&history, 2);
        assert_eq!(by_points.iter().map(|s| s.season).collect::<Vec<_>>(), vec![2027, 2026]);
        let by_wins = best_seasons_by_wins(&history, 5);
        assert_eq!(by_wins.len(), 3);
        assert_eq!(by_wins[2].season, 2025);

        let cups = championship_seasons(&history);
        assert_eq!(cups.iter().map(|s| s.season).collect::<Vec<_>>(), vec![2025, 2027]);
        assert_eq!(stanley_cup_count(&history), 2);
        assert_eq!(
            sorted_history(&history).iter().map(|s| s.season).collect::<Vec<_>>(),
            vec![2025, 2026, 2027]
        );
    }

    #[test]
    fn grade_thresholds() {
        assert!(franchise_grade(&[], 10).is_none());

        // 2 cups (40) + avg wins 40 (20) + 3 awards (6) = 66
        let history = vec![
            snapshot(2025, &[], 40, 90, true),
            snapshot(2026, &[], 40, 90, true),
        ];
        let grade = franchise_grade(&history, 3).unwrap();
        assert!((grade.score - 66.0).abs() < 1e-9);
        assert_eq!(grade.label, "A (Excellent)");

        assert_eq!(grade_label(100.0), "S+ (Dynasty)");
        assert_eq!(grade_label(99.9), "S (Legendary)");
        assert_eq!(grade_label(15.0), "D (Below Average)");
        assert_eq!(grade_label(14.9), "F (Poor)");
    }

    #[test]
    fn award_history_groups_in_declaration_order() {
        let mut hart = Award::player(AwardType::HartTrophy, PlayerId(1), "A");
        hart.year = 2027;
        let mut hart_early = Award::player(AwardType::HartTrophy, PlayerId(1), "A");
        hart_early.year = 2025;
        let mut cup = Award::team(AwardType::StanleyCup, "Falcons");
        cup.year = 2026;
        let awards = vec![hart, cup, hart_early];

        let grouped = award_history(&awards);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, AwardType::StanleyCup);
        assert_eq!(grouped[1].0, AwardType::HartTrophy);
        assert_eq!(grouped[1].1[0].year, 2025);
    }

    #[test]
    fn trades_grouped_newest_first() {
        let mut trades = vec![
            Trade::new("Falcons", "Oilers"),
            Trade::new("Falcons", "Kings"),
            Trade::new("Falcons", "Jets"),
        ];
        trades[0].season = 2025;
        trades[1].season = 2027;
        trades[2].season = 2025;
        let grouped = trades_by_season(&trades);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, 2027);
        assert_eq!(grouped[1].1.len(), 2);
    }

    #[test]
    fn draft_success_counts() {
        let p = skater(1, "A", "B", 2025, 0, 0);
        let mut first = DraftedPlayer::from_player(&p, 2025, 1, 10);
        first.mark_made_nhl(2026);
        let second = DraftedPlayer::from_player(&p, 2025, 2, 42);
        let summary = draft_success_summary(&[first, second]);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.signed, 2);
        assert_eq!(summary.made_nhl, 1);
        assert_eq!(summary.first_rounders, 1);
        assert!((summary.nhl_rate() - 50.0).abs() < 1e-9);
    }
}
