// League awards.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::player::PlayerId;

/// League trophies. `StanleyCup` is the championship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AwardType {
    StanleyCup,
    PresidentsTrophy,
    HartTrophy,
    NorrisTrophy,
    VezinaTrophy,
    CalderTrophy,
    ConnSmytheTrophy,
    LadyByngTrophy,
    SelkeTrophy,
    MastersonTrophy,
    JackAdamsAward,
    TedLindsayAward,
    KingClancyTrophy,
    RocketRichardTrophy,
}

impl AwardType {
    /// Declaration order; used to group award history.
    pub const ALL: [AwardType; 14] = [
        AwardType::StanleyCup,
        AwardType::PresidentsTrophy,
        AwardType::HartTrophy,
        AwardType::NorrisTrophy,
        AwardType::VezinaTrophy,
        AwardType::CalderTrophy,
        AwardType::ConnSmytheTrophy,
        AwardType::LadyByngTrophy,
        AwardType::SelkeTrophy,
        AwardType::MastersonTrophy,
        AwardType::JackAdamsAward,
        AwardType::TedLindsayAward,
        AwardType::KingClancyTrophy,
        AwardType::RocketRichardTrophy,
    ];

    /// Which kind of recipient the trophy normally goes to.
    pub fn category(&self) -> AwardCategory {
        match self {
            AwardType::StanleyCup | AwardType::PresidentsTrophy => AwardCategory::Team,
            _ => AwardCategory::Player,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AwardType::StanleyCup => "Stanley Cup",
            AwardType::PresidentsTrophy => "Presidents' Trophy",
            AwardType::HartTrophy => "Hart Trophy",
            AwardType::NorrisTrophy => "Norris Trophy",
            AwardType::VezinaTrophy => "Vezina Trophy",
            AwardType::CalderTrophy => "Calder Trophy",
            AwardType::ConnSmytheTrophy => "Conn Smythe Trophy",
            AwardType::LadyByngTrophy => "Lady Byng Trophy",
            AwardType::SelkeTrophy => "Selke Trophy",
            AwardType::MastersonTrophy => "Masterson Trophy",
            AwardType::JackAdamsAward => "Jack Adams Award",
            AwardType::TedLindsayAward => "Ted Lindsay Award",
            AwardType::KingClancyTrophy => "King Clancy Trophy",
            AwardType::RocketRichardTrophy => "Rocket Richard Trophy",
        }
    }
}

impl fmt::Display for AwardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AwardCategory {
    Team,
    Player,
}

/// Who received an award.
///
/// Player recipients carry the id for joins against the live roster and the
/// name as it was when the award was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AwardRecipient {
    Team { name: String },
    Player { id: PlayerId, name: String },
}

impl AwardRecipient {
    pub fn category(&self) -> AwardCategory {
        match self {
            AwardRecipient::Team { .. } => AwardCategory::Team,
            AwardRecipient::Player { .. } => AwardCategory::Player,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            AwardRecipient::Team { .. } => "Team",
            AwardRecipient::Player { name, .. } => name,
        }
    }
}

/// An award won in a given season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    /// Stamped by the aggregate when the award is recorded.
    #[serde(default)]
    pub year: u32,
    pub award: AwardType,
    pub recipient: AwardRecipient,
}

impl Award {
    pub fn team(award: AwardType, team_name: impl Into<String>) -> Self {
        Award {
            year: 0,
            award,
            recipient: AwardRecipient::Team {
                name: team_name.into(),
            },
        }
    }

    pub fn player(award: AwardType, id: PlayerId, player_name: impl Into<String>) -> Self {
        Award {
            year: 0,
            award,
            recipient: AwardRecipient::Player {
                id,
                name: player_name.into(),
            },
        }
    }

    pub fn category(&self) -> AwardCategory {
        self.recipient.category()
    }

    pub fn is_championship(&self) -> bool {
        self.award == AwardType::StanleyCup
    }
}
