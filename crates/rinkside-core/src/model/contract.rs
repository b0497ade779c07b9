// Player contracts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-agent class the player falls into when the contract runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContractStatus {
    Rfa,
    Ufa,
}

impl ContractStatus {
    pub fn from_token(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "RFA" => Some(ContractStatus::Rfa),
            "UFA" => Some(ContractStatus::Ufa),
            _ => None,
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractStatus::Rfa => write!(f, "RFA"),
            ContractStatus::Ufa => write!(f, "UFA"),
        }
    }
}

/// Movement protection written into a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractClause {
    #[serde(rename = "NMC")]
    NoMovement,
    #[serde(rename = "NTC")]
    NoTrade,
    #[serde(rename = "M-NTC")]
    ModifiedNoTrade,
}

impl fmt::Display for ContractClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContractClause::NoMovement => "NMC",
            ContractClause::NoTrade => "NTC",
            ContractClause::ModifiedNoTrade => "M-NTC",
        };
        write!(f, "{s}")
    }
}

/// A player contract. Money is in millions.
///
/// `term_in_years` is the remaining term: the season engine decrements it
/// once per advance and stops at zero. A zero-term contract is expired but
/// stays attached to the player until the user renews or clears it.
///
/// `length_in_years` is the term as written at signing and never changes, so
/// the expiration year stays put while the remaining term runs down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub aav: f64,
    pub term_in_years: u32,
    #[serde(default)]
    pub length_in_years: u32,
    pub signing_year: u32,
    pub status: ContractStatus,
    #[serde(default)]
    pub clause: Option<ContractClause>,
    #[serde(default)]
    pub signing_bonus: f64,
    #[serde(default)]
    pub performance_bonus: f64,
    #[serde(default)]
    pub two_way: bool,
}

impl Contract {
    pub fn new(aav: f64, term_in_years: u32, signing_year: u32, status: ContractStatus) -> Self {
        Contract {
            aav,
            term_in_years,
            length_in_years: term_in_years,
            signing_year,
            status,
            clause: None,
            signing_bonus: 0.0,
            performance_bonus: 0.0,
            two_way: false,
        }
    }

    /// `signing_year + term_in_years` at signing time.
    pub fn expiration_year(&self) -> u32 {
        // Saves written before `length_in_years` existed carry 0 there.
        let length = if self.length_in_years == 0 {
            self.term_in_years
        } else {
            self.length_in_years
        };
        self.signing_year + length
    }

    /// Remaining value of the deal: AAV times remaining term.
    pub fn total_value(&self) -> f64 {
        self.aav * f64::from(self.term_in_years)
    }

    pub fn is_expired(&self) -> bool {
        self.term_in_years == 0
    }

    /// Advance one season. Returns `true` if the term changed.
    pub(crate) fn decrement_term(&mut self) -> bool {
        if self.term_in_years > 0 {
            self.term_in_years -= 1;
            true
        } else {
            false
        }
    }
}
