use serde::Serialize;

use super::{id_stamp, Recommender};
use crate::domain::BetLeg;
use crate::odds;
use crate::payout::recommended_stake;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub sport: String,
    pub game: String,
    pub bet_type: String,
    pub selection: String,
    pub odds: i64,
    /// Percent, 0..=100.
    pub confidence: u8,
    pub analysis: String,
    /// Percent of bankroll.
    pub recommended_stake_pct: f64,
}

impl Recommendation {
    /// Builds a slip leg with the suggested stake for `bankroll`.
    pub fn to_leg(&self, bankroll: f64) -> BetLeg {
        BetLeg::new(
            format!("rec-{}-{}", self.id, id_stamp()),
            self.sport.as_str(),
            self.game.as_str(),
            self.bet_type.as_str(),
            self.selection.as_str(),
            self.odds as f64,
        )
        .with_stake(recommended_stake(bankroll, self.recommended_stake_pct))
    }

    pub fn summary(&self, bankroll: f64) -> String {
        format!(
            "[{}] {} | {} | {} {} @ {} | {}% confidence | stake {}% (${:.2})",
            self.id,
            self.sport,
            self.game,
            self.bet_type,
            self.selection,
            odds::format_american(self.odds),
            self.confidence,
            self.recommended_stake_pct,
            recommended_stake(bankroll, self.recommended_stake_pct),
        )
    }
}

/// The fixed pick list shown on the dashboard.
#[derive(Debug, Clone, Default)]
pub struct StaticRecommender;

impl Recommender for StaticRecommender {
    fn name(&self) -> &'static str {
        "static"
    }

    fn recommend(&self) -> Vec<Recommendation> {
        vec![
            rec(
                "1",
                "NBA",
                "Lakers vs Celtics",
                "Spread",
                "Lakers +3.5",
                -110,
                87,
                "Lakers have covered the spread in 7 of their last 10 games. Strong defensive performance expected.",
                2.0,
            ),
            rec(
                "2",
                "NFL",
                "Chiefs vs Bills",
                "Total",
                "Over 47.5",
                -105,
                82,
                "Both offenses ranked top 5 in scoring. Weather conditions favorable for high-scoring game.",
                1.5,
            ),
            rec(
                "3",
                "NHL",
                "Bruins vs Rangers",
                "Moneyline",
                "Bruins ML",
                145,
                75,
                "Value play. Bruins are undervalued as underdogs. Home ice advantage and hot goalie.",
                1.0,
            ),
        ]
    }
}

#[allow(clippy::too_many_arguments)]
fn rec(
    id: &str,
    sport: &str,
    game: &str,
    bet_type: &str,
    selection: &str,
    odds: i64,
    confidence: u8,
    analysis: &str,
    recommended_stake_pct: f64,
) -> Recommendation {
    Recommendation {
        id: id.into(),
        sport: sport.into(),
        game: game.into(),
        bet_type: bet_type.into(),
        selection: selection.into(),
        odds,
        confidence,
        analysis: analysis.into(),
        recommended_stake_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_fixed_picks() {
        let recs = StaticRecommender.recommend();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[2].odds, 145);
        assert!(recs.iter().all(|r| odds::is_valid_american(r.odds as f64)));
    }

    #[test]
    fn leg_carries_bankroll_share_as_stake() {
        let recs = StaticRecommender.recommend();
        let leg = recs[1].to_leg(2000.0);
        assert!(leg.id.starts_with("rec-2-"));
        assert_eq!(leg.selection, "Over 47.5");
        assert_eq!(leg.odds, -105.0);
        assert_eq!(leg.stake, Some(30.0));
    }

    #[test]
    fn summary_line() {
        let recs = StaticRecommender.recommend();
        let line = recs[0].summary(5000.0);
        assert!(line.contains("Lakers +3.5 @ -110"));
        assert!(line.ends_with("stake 2% ($100.00)"));
    }
}
