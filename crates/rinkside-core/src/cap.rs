// Salary cap calculations over the live roster.
//
// Everything here is a pure function of its inputs; callers recompute on
// every query since rosters change between calls.

use crate::model::{Player, Position};

/// Cap total for one position group.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionCapSummary {
    pub position: Position,
    pub total: f64,
    /// Signed players at this position.
    pub count: usize,
    pub average: f64,
}

/// Sum of the AAVs of every signed player. Unsigned players add nothing.
pub fn total_cap_hit<'a>(roster: impl IntoIterator<Item = &'a Player>) -> f64 {
    roster.into_iter().map(Player::cap_hit).sum()
}

/// `ceiling - total_hit`. Negative when over the cap.
pub fn cap_space(ceiling: f64, total_hit: f64) -> f64 {
    ceiling - total_hit
}

/// Whether the payroll sits below the floor.
pub fn is_below_floor(floor: f64, total_hit: f64) -> bool {
    total_hit < floor
}

/// Players whose contract expires in `year`. Contracts whose remaining term
/// has run down to zero still match their original expiration year.
pub fn expiring_contracts<'a>(
    players: impl IntoIterator<Item = &'a Player>,
    year: u32,
) -> Vec<&'a Player> {
    players
        .into_iter()
        .filter(|p| {
            p.contract
                .as_ref()
                .is_some_and(|c| c.expiration_year() == year)
        })
        .collect()
}

/// Per-position totals and averages over signed players, in `Position::ALL`
/// order. Positions without a signed player are omitted.
pub fn cap_by_position<'a>(
    roster: impl IntoIterator<Item = &'a Player>,
) -> Vec<PositionCapSummary> {
    let signed: Vec<&Player> = roster
        .into_iter()
        .filter(|p| p.contract.is_some())
        .collect();

    Position::ALL
        .iter()
        .filter_map(|&position| {
            let at_pos: Vec<f64> = signed
                .iter()
                .filter(|p| p.position == position)
                .map(|p| p.cap_hit())
                .collect();
            if at_pos.is_empty() {
                return None;
            }
            let total: f64 = at_pos.iter().sum();
            let count = at_pos.len();
            Some(PositionCapSummary {
                position,
                total,
                count,
                average: total / count as f64,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contract, ContractStatus};

    fn signed(last: &str, pos: Position, aav: f64, term: u32, year: u32) -> Player {
        Player::new("Test", last, pos, 75, 25)
            .with_contract(Contract::new(aav, term, year, ContractStatus::Ufa))
    }

    fn roster() -> Vec<Player> {
        vec![
            signed("A", Position::Center, 5.0, 2, 2025),
            signed("B", Position::LeftDefense, 3.0, 4, 2025),
            Player::new("Test", "C", Position::RightWing, 68, 21),
        ]
    }

    #[test]
    fn total_and_space_ignore_unsigned() {
        let roster = roster();
        let total = total_cap_hit(&roster);
        assert!((total - 8.0).abs() < 1e-9);
        assert!((cap_space(88.0, total) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn cap_space_goes_negative_over_the_ceiling() {
        assert!((cap_space(88.0, 92.5) + 4.5).abs() < 1e-9);
        assert!(is_below_floor(65.0, 60.0));
        assert!(!is_below_floor(65.0, 65.0));
    }

    #[test]
    fn empty_roster_has_no_hit() {
        let empty: Vec<Player> = Vec::new();
        assert_eq!(total_cap_hit(&empty), 0.0);
        assert!(cap_by_position(&empty).is_empty());
    }

    #[test]
    fn expiring_contracts_match_expiration_year() {
        let roster = roster();
        let expiring = expiring_contracts(&roster, 2027);
        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].last_name, "A");
        assert!(expiring_contracts(&roster, 2026).is_empty());
        assert_eq!(expiring_contracts(&roster, 2029).len(), 1);
    }

    #[test]
    fn by_position_skips_empty_groups() {
        let mut roster = roster();
        roster.push(signed("D", Position::Center, 1.0, 1, 2025));
        let summary = cap_by_position(&roster);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].position, Position::Center);
        assert_eq!(summary[0].count, 2);
        assert!((summary[0].total - 6.0).abs() < 1e-9);
        assert!((summary[0].average - 3.0).abs() < 1e-9);
        assert_eq!(summary[1].position, Position::LeftDefense);
        assert!(summary.iter().all(|s| s.position != Position::RightWing));
    }
}
