// Library root: franchise model, season engine, persistence and config.
// The TUI crate and integration tests use this API.

pub mod archive;
pub mod cap;
pub mod config;
pub mod import;
pub mod ledger;
pub mod model;
pub mod persistence;
pub mod season;
pub mod tracker;

pub use ledger::{DraftPick, DraftPickLedger};
pub use tracker::FranchiseTracker;
