pub mod parser;
pub mod recommend;

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::BetLeg;

pub use parser::MockBetParser;
pub use recommend::{Recommendation, StaticRecommender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Good,
    Caution,
    Avoid,
}

impl Verdict {
    pub fn from_score(score: u8) -> Self {
        match score {
            75..=u8::MAX => Verdict::Good,
            60..=74 => Verdict::Caution,
            _ => Verdict::Avoid,
        }
    }

    pub fn commentary(&self) -> &'static str {
        match self {
            Verdict::Good => "This parlay shows strong value. Both legs have solid backing from recent performance data and favorable matchups.",
            Verdict::Caution => "Moderate risk detected. Consider reducing stake or removing weaker legs. The correlation between these bets may reduce overall value.",
            Verdict::Avoid => "High risk detected. Multiple legs show negative expected value. Consider single bets instead of parlaying.",
        }
    }
}

/// What an analyzer hands back for a pasted slip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub legs: Vec<BetLeg>,
    /// 0..=100
    pub quality_score: u8,
    pub commentary: String,
    pub verdict: Verdict,
}

impl Analysis {
    pub fn scored(legs: Vec<BetLeg>, quality_score: u8) -> Self {
        let verdict = Verdict::from_score(quality_score);
        Self {
            legs,
            quality_score,
            commentary: verdict.commentary().to_string(),
            verdict,
        }
    }
}

/// Turns free-text bet slips into legs plus a quality read.
#[async_trait]
pub trait SlipAnalyzer: Send + Sync {
    fn name(&self) -> &'static str;
    async fn analyze(&self, text: &str) -> anyhow::Result<Analysis>;
}

/// Source of suggested picks.
pub trait Recommender {
    fn name(&self) -> &'static str;
    fn recommend(&self) -> Vec<Recommendation>;
}

static ID_SEQ: AtomicU64 = AtomicU64::new(0);

/// `<millis>.<seq>`; the sequence keeps ids unique within one millisecond.
pub(crate) fn id_stamp() -> String {
    let seq = ID_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}.{seq}", chrono::Utc::now().timestamp_millis())
}
