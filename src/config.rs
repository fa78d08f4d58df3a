use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Session
    pub bankroll: f64,

    // Advisory threshold, 0.05 => warn above 5% of bankroll
    pub stake_warning_pct: f64,

    // Analysis
    pub parse_latency_ms: u64,

    // Logging
    pub log_json: bool,
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().map(|s| s.trim().to_lowercase()) {
        None => default,
        Some(v) if v.is_empty() => default,
        Some(v) if v == "1" || v == "true" || v == "yes" || v == "y" || v == "on" => true,
        Some(v) if v == "0" || v == "false" || v == "no" || v == "n" || v == "off" => false,
        Some(_) => default,
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|x| x.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bankroll: 5000.0,
            stake_warning_pct: 0.05,
            parse_latency_ms: 1500,
            log_json: false,
        }
    }
}

impl Config {
    /// Reads the environment without checking it; call [`Config::validate`]
    /// once overrides are applied.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let cfg = Self {
            bankroll: env_parse::<f64>("DESK_BANKROLL").unwrap_or(defaults.bankroll),
            stake_warning_pct: env_parse::<f64>("DESK_STAKE_WARNING_PCT")
                .unwrap_or(defaults.stake_warning_pct),
            parse_latency_ms: env_parse::<u64>("DESK_PARSE_LATENCY_MS")
                .unwrap_or(defaults.parse_latency_ms),
            log_json: env_bool("DESK_LOG_JSON", defaults.log_json),
        };
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.bankroll.is_finite() || self.bankroll < 0.0 {
            return Err(anyhow!("DESK_BANKROLL must be a non-negative amount"));
        }
        if !(self.stake_warning_pct > 0.0 && self.stake_warning_pct <= 1.0) {
            return Err(anyhow!("DESK_STAKE_WARNING_PCT must be in (0, 1]"));
        }
        Ok(())
    }

    pub fn parse_latency(&self) -> Duration {
        Duration::from_millis(self.parse_latency_ms)
    }
}
