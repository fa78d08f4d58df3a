//! Parlay pricing and bet-slip validation for a sports-betting desk.
//!
//! The core (`odds`, `parlay`, `payout`, `validate`, `quote`) is pure and
//! recomputed from a snapshot on every call. `slip` owns the mutable session,
//! `analysis` holds the mocked parser and recommender, and `shell` is the
//! terminal front end.

pub mod analysis;
pub mod config;
pub mod domain;
pub mod monitoring;
pub mod odds;
pub mod parlay;
pub mod payout;
pub mod quote;
pub mod shell;
pub mod slip;
pub mod validate;

pub use domain::{BetLeg, LegEdit, SlipSnapshot};
pub use parlay::{combined_odds, NO_ODDS};
pub use payout::{potential_win, total_payout, Payout};
pub use quote::Quote;
pub use slip::{Session, SlipState};
pub use validate::{validate, SlipError};
