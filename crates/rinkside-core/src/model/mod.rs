// Entity model: the record types the franchise is built from.

pub mod award;
pub mod contract;
pub mod draft;
pub mod player;
pub mod team;
pub mod trade;

pub use award::{Award, AwardCategory, AwardRecipient, AwardType};
pub use contract::{Contract, ContractClause, ContractStatus};
pub use draft::{round_ordinal, DraftedPlayer};
pub use player::{
    DraftInfo, LeagueLevel, Player, PlayerId, PlayerSeasonStats, Position, Potential,
    PotentialAccuracy,
};
pub use team::{League, Lineup, Team, TeamSeasonStats};
pub use trade::Trade;
