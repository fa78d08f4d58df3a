use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use parlay_desk::analysis::{MockBetParser, StaticRecommender};
use parlay_desk::config::Config;
use parlay_desk::shell::Shell;
use parlay_desk::{monitoring, Quote, Session, SlipSnapshot};

#[derive(Debug, Parser)]
#[command(name = "parlay_desk", version, about = "Parlay calculator and bet-slip validator")]
struct Cli {
    /// Starting bankroll (overrides DESK_BANKROLL)
    #[arg(long)]
    bankroll: Option<f64>,

    /// Emit JSON logs (overrides DESK_LOG_JSON)
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Interactive bet slip (default)
    Shell,
    /// Price and validate a slip JSON file, print the quote as JSON
    Quote { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load local .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut cfg = Config::from_env()?;
    if let Some(bankroll) = cli.bankroll {
        cfg.bankroll = bankroll;
    }
    cfg.log_json |= cli.json_logs;
    cfg.validate()?;

    monitoring::init_tracing(cfg.log_json);
    info!(?cfg, "boot");

    match cli.command.unwrap_or(Cmd::Shell) {
        Cmd::Shell => {
            let session = Session::new(cfg.bankroll)?;
            let shell = Shell::new(
                session,
                Box::new(MockBetParser::new(cfg.parse_latency())),
                Box::new(StaticRecommender),
                cfg.stake_warning_pct,
            );
            shell.run().await?;
        }
        Cmd::Quote { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("reading slip {}", file.display()))?;
            let snap: SlipSnapshot = serde_json::from_str(&raw)
                .with_context(|| format!("parsing slip {}", file.display()))?;
            let quote = Quote::from_snapshot(&snap, cfg.stake_warning_pct);
            info!(legs = quote.selections, placeable = quote.placeable, "quote");
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
    }

    Ok(())
}
