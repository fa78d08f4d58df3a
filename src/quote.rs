use std::fmt;

use serde::Serialize;

use crate::domain::SlipSnapshot;
use crate::odds;
use crate::parlay;
use crate::payout::Payout;
use crate::validate;

/// Everything the bet-slip footer shows, recomputed from one snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub selections: usize,
    pub bet_type: String,
    /// `None` when the slip cannot be priced.
    pub combined_odds: Option<i64>,
    pub combined_odds_display: String,
    pub payout: Payout,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub placeable: bool,
}

impl Quote {
    pub fn from_snapshot(snap: &SlipSnapshot, warning_pct: f64) -> Self {
        let combined = parlay::combined_odds(&snap.legs);
        let errors = validate::validate(&snap.legs, snap.total_stake, snap.bankroll);
        let warnings = validate::stake_warnings(snap.total_stake, snap.bankroll, warning_pct)
            .iter()
            .map(|w| w.message())
            .collect();

        Self {
            selections: snap.legs.len(),
            bet_type: parlay::bet_type_label(snap.legs.len()),
            combined_odds: (combined != parlay::NO_ODDS).then_some(combined),
            combined_odds_display: odds::format_american(combined),
            payout: Payout::compute(snap.total_stake, &snap.legs),
            placeable: errors.is_empty(),
            errors: validate::messages(&errors),
            warnings,
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.selections == 1 { "selection" } else { "selections" };
        writeln!(f, "{} {noun} | {}", self.selections, self.bet_type)?;
        writeln!(f, "total odds {}", self.combined_odds_display)?;
        writeln!(f, "{}", self.payout)?;
        for w in &self.warnings {
            writeln!(f, "  ! {w}")?;
        }
        for e in &self.errors {
            writeln!(f, "  x {e}")?;
        }
        write!(f, "{}", if self.placeable { "ready to place" } else { "cannot place yet" })
    }
}
