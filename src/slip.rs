use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{BetLeg, LegEdit, SlipSnapshot};
use crate::odds::{self, OddsError};
use crate::parlay;
use crate::payout::Payout;
use crate::validate::{self, SlipError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SlipState {
    Empty,
    /// First legs staged, nothing changed since.
    Editable,
    Placeable,
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("no leg with id {0}")]
    UnknownLeg(String),
    #[error("invalid odds in edit: {0}")]
    InvalidEdit(#[source] OddsError),
    #[error("bankroll must be a non-negative amount, got {0}")]
    InvalidBankroll(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaceError {
    #[error("slip cannot be placed: {}", validate::messages(.0).join(" "))]
    NotPlaceable(Vec<SlipError>),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Slip {
    pub legs: Vec<BetLeg>,
    pub total_stake: f64,
}

/// Receipt for a placed bet. Nothing keeps it once the caller drops it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedBet {
    pub legs: Vec<BetLeg>,
    pub combined_odds: i64,
    pub payout: Payout,
    pub bankroll_after: f64,
}

/// Bankroll and slip owned by one interactive session.
#[derive(Debug, Clone)]
pub struct Session {
    bankroll: f64,
    slip: Slip,
    // Set by any leg or stake change after the first add; cleared with the slip.
    touched: bool,
}

impl Session {
    pub fn new(bankroll: f64) -> Result<Self, SessionError> {
        check_bankroll(bankroll)?;
        Ok(Self { bankroll, slip: Slip::default(), touched: false })
    }

    pub fn bankroll(&self) -> f64 {
        self.bankroll
    }

    pub fn legs(&self) -> &[BetLeg] {
        &self.slip.legs
    }

    pub fn stake(&self) -> f64 {
        self.slip.total_stake
    }

    pub fn snapshot(&self) -> SlipSnapshot {
        SlipSnapshot {
            legs: self.slip.legs.clone(),
            total_stake: self.slip.total_stake,
            bankroll: self.bankroll,
        }
    }

    /// Appends as-is; duplicates are reported by validation, never merged.
    pub fn append_legs(&mut self, legs: impl IntoIterator<Item = BetLeg>) {
        let before = self.slip.legs.len();
        self.slip.legs.extend(legs);
        self.touched = before > 0;
        debug!(added = self.slip.legs.len() - before, total = self.slip.legs.len(), "slip.append");
    }

    pub fn update_leg(&mut self, id: &str, edit: &LegEdit) -> Result<(), SessionError> {
        if let Some(odds) = edit.odds {
            odds::check_american(odds).map_err(SessionError::InvalidEdit)?;
        }
        let leg = self
            .slip
            .legs
            .iter_mut()
            .find(|leg| leg.id == id)
            .ok_or_else(|| SessionError::UnknownLeg(id.to_string()))?;
        edit.apply(leg);
        self.touched = true;
        debug!(id, "slip.update_leg");
        Ok(())
    }

    pub fn remove_leg(&mut self, id: &str) -> Result<BetLeg, SessionError> {
        let idx = self
            .slip
            .legs
            .iter()
            .position(|leg| leg.id == id)
            .ok_or_else(|| SessionError::UnknownLeg(id.to_string()))?;
        self.touched = true;
        Ok(self.slip.legs.remove(idx))
    }

    pub fn set_stake(&mut self, stake: f64) {
        self.slip.total_stake = stake;
        self.touched = true;
    }

    pub fn set_bankroll(&mut self, bankroll: f64) -> Result<(), SessionError> {
        check_bankroll(bankroll)?;
        self.bankroll = bankroll;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.slip = Slip::default();
        self.touched = false;
    }

    pub fn errors(&self) -> Vec<SlipError> {
        validate::validate(&self.slip.legs, self.slip.total_stake, self.bankroll)
    }

    pub fn state(&self) -> SlipState {
        if self.slip.legs.is_empty() {
            SlipState::Empty
        } else if !self.touched {
            SlipState::Editable
        } else if self.errors().is_empty() {
            SlipState::Placeable
        } else {
            SlipState::Blocked
        }
    }

    /// Deducts the stake and empties the slip. Leaves everything untouched on error.
    pub fn place(&mut self) -> Result<PlacedBet, PlaceError> {
        let errors = self.errors();
        if !errors.is_empty() {
            info!(errors = ?errors, "slip.place.blocked");
            return Err(PlaceError::NotPlaceable(errors));
        }

        let stake = self.slip.total_stake;
        let combined_odds = parlay::combined_odds(&self.slip.legs);
        let payout = Payout::compute(stake, &self.slip.legs);
        self.bankroll -= stake;

        let legs = std::mem::take(&mut self.slip.legs);
        self.clear();

        info!(
            legs = legs.len(),
            stake,
            combined_odds,
            potential_win = payout.potential_win,
            bankroll = self.bankroll,
            "slip.place"
        );

        Ok(PlacedBet { legs, combined_odds, payout, bankroll_after: self.bankroll })
    }
}

fn check_bankroll(bankroll: f64) -> Result<(), SessionError> {
    if bankroll.is_finite() && bankroll >= 0.0 {
        Ok(())
    } else {
        Err(SessionError::InvalidBankroll(bankroll))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(id: &str, game: &str, odds: f64) -> BetLeg {
        BetLeg::new(id, "NFL", game, "Moneyline", "home", odds)
    }

    #[test]
    fn lifecycle_empty_to_placed() {
        let mut s = Session::new(5000.0).unwrap();
        assert_eq!(s.state(), SlipState::Empty);

        s.append_legs([leg("a", "Chiefs vs Bills", -110.0)]);
        assert_eq!(s.state(), SlipState::Editable);

        s.set_stake(100.0);
        assert_eq!(s.state(), SlipState::Placeable);

        let placed = s.place().unwrap();
        assert_eq!(placed.combined_odds, -110);
        assert_eq!(placed.legs.len(), 1);
        assert_eq!(placed.bankroll_after, 4900.0);
        assert_eq!(s.bankroll(), 4900.0);
        assert_eq!(s.stake(), 0.0);
        assert_eq!(s.state(), SlipState::Empty);
    }

    #[test]
    fn zero_stake_after_edits_blocks() {
        let mut s = Session::new(5000.0).unwrap();
        s.append_legs([leg("a", "Chiefs vs Bills", -110.0)]);
        s.set_stake(100.0);
        assert_eq!(s.state(), SlipState::Placeable);

        s.set_stake(0.0);
        assert_eq!(s.errors(), vec![SlipError::NonPositiveStake]);
        assert_eq!(s.state(), SlipState::Blocked);

        s.append_legs([BetLeg::new("b", "NFL", "chiefs vs bills ", "moneyline", "HOME", 0.0)]);
        assert_eq!(
            s.errors(),
            vec![
                SlipError::NonPositiveStake,
                SlipError::InvalidOdds,
                SlipError::DuplicateSelections,
            ]
        );
        assert_eq!(s.state(), SlipState::Blocked);
    }

    #[test]
    fn second_add_leaves_editable() {
        let mut s = Session::new(5000.0).unwrap();
        s.append_legs([leg("a", "Chiefs vs Bills", -110.0)]);
        assert_eq!(s.state(), SlipState::Editable);
        s.append_legs([leg("b", "Bruins vs Rangers", 145.0)]);
        assert_eq!(s.state(), SlipState::Blocked);

        s.clear();
        s.append_legs([leg("c", "Lakers vs Celtics", 120.0)]);
        assert_eq!(s.state(), SlipState::Editable);
    }

    #[test]
    fn blocked_slip_does_not_place() {
        let mut s = Session::new(50.0).unwrap();
        s.append_legs([leg("a", "Chiefs vs Bills", -110.0)]);
        s.set_stake(100.0);
        assert_eq!(s.state(), SlipState::Blocked);

        let err = s.place().unwrap_err();
        assert_eq!(err, PlaceError::NotPlaceable(vec![SlipError::StakeExceedsBankroll]));
        assert_eq!(s.bankroll(), 50.0);
        assert_eq!(s.legs().len(), 1);
    }

    #[test]
    fn whole_bankroll_can_be_staked() {
        let mut s = Session::new(250.0).unwrap();
        s.append_legs([leg("a", "Chiefs vs Bills", 120.0)]);
        s.set_stake(250.0);
        let placed = s.place().unwrap();
        assert_eq!(placed.bankroll_after, 0.0);
    }

    #[test]
    fn duplicates_are_kept_and_block() {
        let mut s = Session::new(1000.0).unwrap();
        s.append_legs([leg("a", "Chiefs vs Bills", -110.0)]);
        s.append_legs([leg("b", "chiefs vs bills", -120.0)]);
        s.set_stake(10.0);
        assert_eq!(s.legs().len(), 2);
        assert_eq!(s.errors(), vec![SlipError::DuplicateSelections]);
        assert_eq!(s.state(), SlipState::Blocked);
    }

    #[test]
    fn edit_rejects_zero_odds_and_unknown_ids() {
        let mut s = Session::new(1000.0).unwrap();
        s.append_legs([leg("a", "Chiefs vs Bills", -110.0)]);

        let zero = LegEdit { odds: Some(0.0), ..LegEdit::default() };
        assert_eq!(s.update_leg("a", &zero), Err(SessionError::InvalidEdit(OddsError::Zero)));
        assert_eq!(s.legs()[0].odds, -110.0);

        let ok = LegEdit {
            odds: Some(150.0),
            selection: Some("away".into()),
            ..LegEdit::default()
        };
        assert_eq!(
            s.update_leg("zzz", &ok),
            Err(SessionError::UnknownLeg("zzz".into()))
        );
        s.update_leg("a", &ok).unwrap();
        assert_eq!(s.legs()[0].odds, 150.0);
        assert_eq!(s.legs()[0].selection, "away");
    }

    #[test]
    fn remove_and_clear() {
        let mut s = Session::new(1000.0).unwrap();
        s.append_legs([leg("a", "G1", -110.0), leg("b", "G2", 130.0)]);
        s.set_stake(20.0);
        let removed = s.remove_leg("a").unwrap();
        assert_eq!(removed.id, "a");
        assert_eq!(s.legs().len(), 1);
        assert!(s.remove_leg("a").is_err());

        s.clear();
        assert_eq!(s.state(), SlipState::Empty);
        assert_eq!(s.stake(), 0.0);
    }

    #[test]
    fn bankroll_must_be_non_negative() {
        assert!(Session::new(-1.0).is_err());
        let mut s = Session::new(0.0).unwrap();
        assert!(s.set_bankroll(f64::NAN).is_err());
        s.set_bankroll(300.0).unwrap();
        assert_eq!(s.bankroll(), 300.0);
    }
}
