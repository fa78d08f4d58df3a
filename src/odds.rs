use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OddsError {
    #[error("american odds cannot be 0")]
    Zero,
    #[error("american odds must be finite, got {0}")]
    NonFinite(f64),
    #[error("american odds must be a whole number, got {0}")]
    Fractional(f64),
    /// Decimal odds at or below 1.0 have no american equivalent.
    #[error("decimal odds {0} cannot be converted to american odds")]
    Degenerate(f64),
}

/// Checks the precondition every leg must meet before it can be priced.
pub fn check_american(odds: f64) -> Result<(), OddsError> {
    if !odds.is_finite() {
        return Err(OddsError::NonFinite(odds));
    }
    if odds == 0.0 {
        return Err(OddsError::Zero);
    }
    if odds.fract() != 0.0 {
        return Err(OddsError::Fractional(odds));
    }
    Ok(())
}

pub fn is_valid_american(odds: f64) -> bool {
    check_american(odds).is_ok()
}

/// American -> decimal (total return per unit staked).
pub fn to_decimal(odds: f64) -> Result<f64, OddsError> {
    check_american(odds)?;
    if odds > 0.0 {
        Ok(odds / 100.0 + 1.0)
    } else {
        Ok(100.0 / odds.abs() + 1.0)
    }
}

/// Decimal -> american, rounded to the nearest whole number.
pub fn from_decimal(decimal: f64) -> Result<i64, OddsError> {
    if !decimal.is_finite() || decimal <= 1.0 {
        return Err(OddsError::Degenerate(decimal));
    }
    let american = if decimal >= 2.0 {
        round_half_up((decimal - 1.0) * 100.0)
    } else {
        round_half_up(-100.0 / (decimal - 1.0))
    };
    // i64 casts saturate; anything that large is not a price.
    if !american.is_finite() || american.abs() >= i64::MAX as f64 {
        return Err(OddsError::Degenerate(decimal));
    }
    Ok(american as i64)
}

/// Halves round toward +inf, so -150.5 becomes -150.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Renders american odds with an explicit sign. The zero sentinel is `N/A`.
pub fn format_american(odds: i64) -> String {
    match odds {
        0 => "N/A".to_string(),
        n if n > 0 => format!("+{n}"),
        n => n.to_string(),
    }
}

/// Same as [`format_american`] for a raw leg value, which may be invalid.
pub fn format_leg_odds(odds: f64) -> String {
    if is_valid_american(odds) {
        format_american(odds as i64)
    } else {
        format!("{odds} (invalid)")
    }
}
