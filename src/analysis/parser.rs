use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rand::Rng;
use tracing::info;

use super::{id_stamp, Analysis, SlipAnalyzer};
use crate::domain::BetLeg;

/// Stand-in for the AI slip parser: ignores the text and returns a fixed
/// two-leg parlay with a random quality score.
#[derive(Debug, Clone)]
pub struct MockBetParser {
    pub latency: Duration,
}

impl MockBetParser {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl SlipAnalyzer for MockBetParser {
    fn name(&self) -> &'static str {
        "mock-parser"
    }

    async fn analyze(&self, text: &str) -> Result<Analysis> {
        if text.trim().is_empty() {
            return Err(anyhow!("nothing to analyze: bet slip text is empty"));
        }

        tokio::time::sleep(self.latency).await;

        let stamp = id_stamp();
        let legs = vec![
            BetLeg::new(
                format!("leg-{stamp}-1"),
                "NBA",
                "Warriors vs Nuggets",
                "Spread",
                "Warriors -2.5",
                -110.0,
            ),
            BetLeg::new(
                format!("leg-{stamp}-2"),
                "NFL",
                "Cowboys vs Eagles",
                "Moneyline",
                "Cowboys ML",
                165.0,
            ),
        ];
        let score: u8 = rand::thread_rng().gen_range(60..90);

        info!(analyzer = self.name(), chars = text.len(), score, "analysis.parse");
        Ok(Analysis::scored(legs, score))
    }
}
