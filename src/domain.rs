use serde::{Deserialize, Serialize};

/// One selection within a slip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetLeg {
    pub id: String,
    pub sport: String,
    pub game: String,
    pub bet_type: String,
    pub selection: String,

    /// American odds. Kept as a float so bad input survives until validation.
    pub odds: f64,

    /// Suggested stake, only set on legs built from recommendations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stake: Option<f64>,
}

impl BetLeg {
    pub fn new(
        id: impl Into<String>,
        sport: impl Into<String>,
        game: impl Into<String>,
        bet_type: impl Into<String>,
        selection: impl Into<String>,
        odds: f64,
    ) -> Self {
        Self {
            id: id.into(),
            sport: sport.into(),
            game: game.into(),
            bet_type: bet_type.into(),
            selection: selection.into(),
            odds,
            stake: None,
        }
    }

    pub fn with_stake(mut self, stake: f64) -> Self {
        self.stake = Some(stake);
        self
    }

    /// Identity used for duplicate detection: trimmed, lowercased
    /// `(game, bet_type, selection)`.
    pub fn dedup_key(&self) -> (String, String, String) {
        (
            normalize(&self.game),
            normalize(&self.bet_type),
            normalize(&self.selection),
        )
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Partial update of a leg. Only these three fields are editable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegEdit {
    #[serde(default)]
    pub selection: Option<String>,
    #[serde(default)]
    pub odds: Option<f64>,
    #[serde(default)]
    pub bet_type: Option<String>,
}

impl LegEdit {
    pub fn is_empty(&self) -> bool {
        self.selection.is_none() && self.odds.is_none() && self.bet_type.is_none()
    }

    pub fn apply(&self, leg: &mut BetLeg) {
        if let Some(selection) = &self.selection {
            leg.selection = selection.clone();
        }
        if let Some(odds) = self.odds {
            leg.odds = odds;
        }
        if let Some(bet_type) = &self.bet_type {
            leg.bet_type = bet_type.clone();
        }
    }
}

/// Immutable view of a slip handed to the calculator and validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlipSnapshot {
    #[serde(default)]
    pub legs: Vec<BetLeg>,
    #[serde(default)]
    pub total_stake: f64,
    pub bankroll: f64,
}
