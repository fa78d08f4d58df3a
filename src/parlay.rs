use thiserror::Error;

use crate::domain::BetLeg;
use crate::odds::{self, OddsError};

/// Sentinel returned by [`combined_odds`] when a slip cannot be priced.
pub const NO_ODDS: i64 = 0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParlayError {
    #[error("slip has no legs")]
    Empty,
    #[error("leg {id} has invalid odds: {source}")]
    InvalidLeg {
        id: String,
        #[source]
        source: OddsError,
    },
    #[error("combined odds could not be priced: {0}")]
    Unpriceable(#[source] OddsError),
}

/// Product of every leg's decimal odds, unrounded.
pub fn combined_decimal(legs: &[BetLeg]) -> Result<f64, ParlayError> {
    if legs.is_empty() {
        return Err(ParlayError::Empty);
    }
    legs.iter().try_fold(1.0_f64, |acc, leg| {
        let decimal = odds::to_decimal(leg.odds).map_err(|source| ParlayError::InvalidLeg {
            id: leg.id.clone(),
            source,
        })?;
        Ok(acc * decimal)
    })
}

/// Combined american odds of the whole slip. Rounds once, at the end.
pub fn try_combined_odds(legs: &[BetLeg]) -> Result<i64, ParlayError> {
    let decimal = combined_decimal(legs)?;
    odds::from_decimal(decimal).map_err(ParlayError::Unpriceable)
}

/// Like [`try_combined_odds`] but collapses every failure into [`NO_ODDS`].
pub fn combined_odds(legs: &[BetLeg]) -> i64 {
    try_combined_odds(legs).unwrap_or(NO_ODDS)
}

pub fn bet_type_label(leg_count: usize) -> String {
    match leg_count {
        0 => "Empty".to_string(),
        1 => "Single".to_string(),
        n => format!("{n}-Leg Parlay"),
    }
}
