use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::domain::BetLeg;
use crate::odds;
use crate::parlay::{self, ParlayError};

/// Reasons a slip cannot be placed. `Display` is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum SlipError {
    #[error("Add at least one selection.")]
    NoSelections,
    #[error("Stake must be greater than $0.")]
    NonPositiveStake,
    #[error("Stake exceeds bankroll.")]
    StakeExceedsBankroll,
    #[error("One or more selections have invalid odds (cannot be 0).")]
    InvalidOdds,
    #[error("Duplicate selections detected in your slip.")]
    DuplicateSelections,
    #[error("Total odds could not be calculated.")]
    Unpriceable,
}

/// Runs every rule and collects all that fail. Empty means placeable.
pub fn validate(legs: &[BetLeg], stake: f64, bankroll: f64) -> Vec<SlipError> {
    let mut errors = Vec::new();

    if legs.is_empty() {
        errors.push(SlipError::NoSelections);
    }
    if !(stake > 0.0) {
        errors.push(SlipError::NonPositiveStake);
    }
    if stake > bankroll {
        errors.push(SlipError::StakeExceedsBankroll);
    }

    let invalid_odds = legs.iter().any(|leg| !odds::is_valid_american(leg.odds));
    if invalid_odds {
        errors.push(SlipError::InvalidOdds);
    }

    if has_duplicates(legs) {
        errors.push(SlipError::DuplicateSelections);
    }

    // A bad leg already explains a missing price; only report aggregation failures.
    if !legs.is_empty() && !invalid_odds {
        if let Err(ParlayError::Unpriceable(_)) = parlay::try_combined_odds(legs) {
            errors.push(SlipError::Unpriceable);
        }
    }

    errors
}

pub fn is_placeable(legs: &[BetLeg], stake: f64, bankroll: f64) -> bool {
    validate(legs, stake, bankroll).is_empty()
}

pub fn messages(errors: &[SlipError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

fn has_duplicates(legs: &[BetLeg]) -> bool {
    let mut seen = HashSet::with_capacity(legs.len());
    legs.iter().any(|leg| !seen.insert(leg.dedup_key()))
}

/// Advisory only; never blocks placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeWarning {
    pub stake: f64,
    pub limit: f64,
    pub pct: f64,
}

impl StakeWarning {
    pub fn message(&self) -> String {
        let pct = (self.pct * 100.0 * 100.0).round() / 100.0;
        format!("Warning: Stake exceeds {pct}% of bankroll")
    }
}

pub fn stake_warnings(stake: f64, bankroll: f64, warning_pct: f64) -> Vec<StakeWarning> {
    let limit = bankroll * warning_pct;
    if stake > limit {
        vec![StakeWarning { stake, limit, pct: warning_pct }]
    } else {
        vec![]
    }
}
