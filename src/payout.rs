use std::fmt;

use serde::Serialize;

use crate::domain::BetLeg;
use crate::parlay::{self, NO_ODDS};

/// Share of bankroll used for the standard betting unit.
pub const RECOMMENDED_UNIT_PCT: f64 = 2.0;
/// Share of bankroll used for the conservative betting unit.
pub const CONSERVATIVE_UNIT_PCT: f64 = 1.0;

/// Profit if every leg wins. Zero whenever the slip cannot be priced.
pub fn potential_win(stake: f64, legs: &[BetLeg]) -> f64 {
    // also catches NaN
    if !(stake > 0.0) || legs.is_empty() {
        return 0.0;
    }
    match parlay::combined_odds(legs) {
        NO_ODDS => 0.0,
        odds if odds > 0 => stake * (odds as f64 / 100.0),
        odds => stake * (100.0 / (odds as f64).abs()),
    }
}

pub fn total_payout(stake: f64, legs: &[BetLeg]) -> f64 {
    stake + potential_win(stake, legs)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub stake: f64,
    pub potential_win: f64,
    pub total_payout: f64,
}

impl Payout {
    pub fn compute(stake: f64, legs: &[BetLeg]) -> Self {
        let potential_win = potential_win(stake, legs);
        Self {
            stake,
            potential_win,
            total_payout: stake + potential_win,
        }
    }
}

impl fmt::Display for Payout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stake ${:.2} | potential win ${:.2} | total payout ${:.2}",
            self.stake, self.potential_win, self.total_payout
        )
    }
}

/// `pct` percent of the bankroll, e.g. `recommended_stake(5000.0, 2.0) == 100.0`.
pub fn recommended_stake(bankroll: f64, pct: f64) -> f64 {
    bankroll * pct / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSizing {
    pub recommended_unit: f64,
    pub conservative_unit: f64,
}

impl UnitSizing {
    pub fn for_bankroll(bankroll: f64) -> Self {
        Self {
            recommended_unit: recommended_stake(bankroll, RECOMMENDED_UNIT_PCT),
            conservative_unit: recommended_stake(bankroll, CONSERVATIVE_UNIT_PCT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(id: &str, odds: f64) -> BetLeg {
        BetLeg::new(id, "NFL", format!("game {id}"), "Moneyline", format!("pick {id}"), odds)
    }

    #[test]
    fn single_favourite_at_100() {
        let legs = [leg("a", -110.0)];
        let payout = Payout::compute(100.0, &legs);
        assert!((payout.potential_win - 90.909_090_9).abs() < 1e-6);
        assert!((payout.total_payout - 190.909_090_9).abs() < 1e-6);
        assert_eq!(
            payout.to_string(),
            "stake $100.00 | potential win $90.91 | total payout $190.91"
        );
    }

    #[test]
    fn underdog_pays_odds_over_100() {
        assert!((potential_win(50.0, &[leg("a", 145.0)]) - 72.5).abs() < 1e-9);
    }

    #[test]
    fn nothing_to_win_without_stake_or_legs() {
        assert_eq!(potential_win(0.0, &[leg("a", -110.0)]), 0.0);
        assert_eq!(potential_win(-5.0, &[leg("a", -110.0)]), 0.0);
        assert_eq!(potential_win(f64::NAN, &[leg("a", -110.0)]), 0.0);
        assert_eq!(potential_win(100.0, &[]), 0.0);
        assert_eq!(total_payout(0.0, &[]), 0.0);
    }

    #[test]
    fn unpriceable_slip_pays_nothing() {
        let legs = [leg("a", -110.0), leg("b", 0.0)];
        assert_eq!(potential_win(100.0, &legs), 0.0);
        assert_eq!(total_payout(100.0, &legs), 100.0);
    }

    #[test]
    fn win_grows_with_stake() {
        let legs = [leg("a", -110.0), leg("b", 165.0), leg("c", -105.0)];
        let mut last = 0.0;
        for stake in [1.0, 5.0, 10.0, 25.5, 100.0, 600.0, 5000.0] {
            let win = potential_win(stake, &legs);
            assert!(win > last, "stake {stake} gave {win} <= {last}");
            last = win;
        }
    }

    #[test]
    fn unit_sizing_from_bankroll() {
        let units = UnitSizing::for_bankroll(5000.0);
        assert_eq!(units.recommended_unit, 100.0);
        assert_eq!(units.conservative_unit, 50.0);
        assert_eq!(recommended_stake(1000.0, 1.5), 15.0);
    }
}
