use std::fmt::Write as _;

use anyhow::Result;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::analysis::{id_stamp, Recommender, SlipAnalyzer};
use crate::domain::{BetLeg, LegEdit};
use crate::odds;
use crate::payout::UnitSizing;
use crate::quote::Quote;
use crate::slip::Session;

pub const HELP: &str = "\
commands:
  show                                      slip, bankroll and quote
  recs                                      list recommended picks
  rec <n>                                   add recommendation n to the slip
  parse <text>                              analyze a pasted bet slip and add its legs
  add <sport>|<game>|<type>|<selection>|<odds>
  edit <id> odds=<n>; selection=<s>; type=<s>
  remove <id>
  stake <amount>
  bankroll <amount>
  place
  clear
  help
  quit";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{cmd}` needs {what}")]
    MissingArg { cmd: &'static str, what: &'static str },
    #[error("`{value}` is not a valid {what}")]
    BadNumber { what: &'static str, value: String },
    #[error("bad edit field `{0}`, expected odds=, selection= or type=")]
    BadEdit(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Show,
    Recs,
    Rec(usize),
    Parse(String),
    Add(BetLeg),
    Edit { id: String, edit: LegEdit },
    Remove(String),
    Stake(f64),
    Bankroll(f64),
    Place,
    Clear,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "help" | "?" => Ok(Command::Help),
            "show" | "slip" => Ok(Command::Show),
            "recs" => Ok(Command::Recs),
            "rec" => {
                let n = require(rest, "rec", "a recommendation number")?;
                n.parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .map(Command::Rec)
                    .ok_or_else(|| bad_number("recommendation number", n))
            }
            "parse" => Ok(Command::Parse(require(rest, "parse", "bet slip text")?.to_string())),
            "add" => parse_add(rest),
            "edit" => parse_edit(rest),
            "remove" | "rm" => Ok(Command::Remove(require(rest, "remove", "a leg id")?.to_string())),
            "stake" => Ok(Command::Stake(parse_amount(require(rest, "stake", "an amount")?, "stake")?)),
            "bankroll" => Ok(Command::Bankroll(parse_amount(
                require(rest, "bankroll", "an amount")?,
                "bankroll",
            )?)),
            "place" => Ok(Command::Place),
            "clear" => Ok(Command::Clear),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn require<'a>(rest: &'a str, cmd: &'static str, what: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArg { cmd, what })
    } else {
        Ok(rest)
    }
}

fn bad_number(what: &'static str, value: &str) -> CommandError {
    CommandError::BadNumber { what, value: value.to_string() }
}

fn parse_amount(raw: &str, what: &'static str) -> Result<f64, CommandError> {
    raw.trim_start_matches('$')
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| bad_number(what, raw))
}

// Odds are parsed leniently; validation decides whether they are usable.
fn parse_odds(raw: &str) -> Result<f64, CommandError> {
    raw.trim().parse::<f64>().map_err(|_| bad_number("odds", raw))
}

fn parse_add(rest: &str) -> Result<Command, CommandError> {
    let what = "sport|game|type|selection|odds";
    let parts: Vec<&str> = require(rest, "add", what)?.split('|').map(str::trim).collect();
    let &[sport, game, bet_type, selection, raw_odds] = parts.as_slice() else {
        return Err(CommandError::MissingArg { cmd: "add", what });
    };
    let odds = parse_odds(raw_odds)?;
    Ok(Command::Add(BetLeg::new(
        format!("manual-{}", id_stamp()),
        sport,
        game,
        bet_type,
        selection,
        odds,
    )))
}

fn parse_edit(rest: &str) -> Result<Command, CommandError> {
    let rest = require(rest, "edit", "a leg id and fields")?;
    let (id, fields) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));

    let mut edit = LegEdit::default();
    for field in fields.split(';').map(str::trim).filter(|f| !f.is_empty()) {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| CommandError::BadEdit(field.to_string()))?;
        let value = value.trim();
        match key.trim().to_lowercase().as_str() {
            "odds" => edit.odds = Some(parse_odds(value)?),
            "selection" => edit.selection = Some(value.to_string()),
            "type" | "bettype" => edit.bet_type = Some(value.to_string()),
            _ => return Err(CommandError::BadEdit(field.to_string())),
        }
    }
    if edit.is_empty() {
        return Err(CommandError::MissingArg { cmd: "edit", what: "at least one field" });
    }
    Ok(Command::Edit { id: id.to_string(), edit })
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// Interactive front end over one [`Session`].
pub struct Shell {
    session: Session,
    analyzer: Box<dyn SlipAnalyzer>,
    recommender: Box<dyn Recommender>,
    warning_pct: f64,
}

impl Shell {
    pub fn new(
        session: Session,
        analyzer: Box<dyn SlipAnalyzer>,
        recommender: Box<dyn Recommender>,
        warning_pct: f64,
    ) -> Self {
        Self { session, analyzer, recommender, warning_pct }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn execute(&mut self, cmd: Command) -> Result<Reply> {
        let text = match cmd {
            Command::Quit => return Ok(Reply::Quit),
            Command::Help => HELP.to_string(),
            Command::Show => self.render(),
            Command::Recs => {
                let bankroll = self.session.bankroll();
                self.recommender
                    .recommend()
                    .iter()
                    .map(|r| r.summary(bankroll))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Command::Rec(n) => {
                let recs = self.recommender.recommend();
                let Some(rec) = n.checked_sub(1).and_then(|i| recs.get(i)) else {
                    return Ok(Reply::Text(format!("no recommendation #{n} ({} available)", recs.len())));
                };
                let leg = rec.to_leg(self.session.bankroll());
                let line = format!("added {} ({})", leg.selection, leg.id);
                self.session.append_legs([leg]);
                format!("{line}\n{}", self.quote())
            }
            Command::Parse(text) => {
                let analysis = self.analyzer.analyze(&text).await?;
                let mut out = format!(
                    "quality score {}/100 ({:?})\n{}\n",
                    analysis.quality_score, analysis.verdict, analysis.commentary
                );
                for leg in &analysis.legs {
                    let _ = writeln!(out, "  + {} {} @ {}", leg.game, leg.selection, odds::format_leg_odds(leg.odds));
                }
                self.session.append_legs(analysis.legs);
                out.push_str(&self.quote().to_string());
                out
            }
            Command::Add(leg) => {
                let line = format!("added {} ({})", leg.selection, leg.id);
                self.session.append_legs([leg]);
                format!("{line}\n{}", self.quote())
            }
            Command::Edit { id, edit } => {
                self.session.update_leg(&id, &edit)?;
                format!("updated {id}\n{}", self.quote())
            }
            Command::Remove(id) => {
                let leg = self.session.remove_leg(&id)?;
                format!("removed {}\n{}", leg.selection, self.quote())
            }
            Command::Stake(stake) => {
                self.session.set_stake(stake);
                self.quote().to_string()
            }
            Command::Bankroll(amount) => {
                self.session.set_bankroll(amount)?;
                format!("bankroll ${:.2}", self.session.bankroll())
            }
            Command::Place => {
                let placed = self.session.place()?;
                format!(
                    "bet placed: {} leg(s) at {} | {}\nbankroll now ${:.2}",
                    placed.legs.len(),
                    odds::format_american(placed.combined_odds),
                    placed.payout,
                    placed.bankroll_after
                )
            }
            Command::Clear => {
                self.session.clear();
                "slip cleared".to_string()
            }
        };
        Ok(Reply::Text(text))
    }

    fn quote(&self) -> Quote {
        Quote::from_snapshot(&self.session.snapshot(), self.warning_pct)
    }

    fn render(&self) -> String {
        let bankroll = self.session.bankroll();
        let units = UnitSizing::for_bankroll(bankroll);
        let mut out = format!(
            "bankroll ${bankroll:.2} (unit ${:.2}, conservative ${:.2})\nstate {:?}\n",
            units.recommended_unit,
            units.conservative_unit,
            self.session.state()
        );
        if self.session.legs().is_empty() {
            out.push_str("your bet slip is empty\n");
        }
        for leg in self.session.legs() {
            let _ = write!(
                out,
                "  [{}] {} | {} | {} | {} @ {}",
                leg.id,
                leg.sport,
                leg.game,
                leg.bet_type,
                leg.selection,
                odds::format_leg_odds(leg.odds)
            );
            if let Some(stake) = leg.stake {
                let _ = write!(out, " (suggested ${stake:.2})");
            }
            out.push('\n');
        }
        out.push_str(&self.quote().to_string());
        out
    }

    /// Reads commands from stdin until `quit` or EOF.
    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        info!(
            analyzer = self.analyzer.name(),
            recommender = self.recommender.name(),
            bankroll = self.session.bankroll(),
            "shell.start"
        );
        say(&mut stdout, "parlay desk ready, `help` lists commands").await?;

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let reply = match Command::parse(&line) {
                Ok(cmd) => self.execute(cmd).await,
                Err(e) => Err(e.into()),
            };
            match reply {
                Ok(Reply::Quit) => break,
                Ok(Reply::Text(text)) => say(&mut stdout, &text).await?,
                Err(e) => {
                    warn!(error = %e, "shell.command_failed");
                    say(&mut stdout, &format!("error: {e}")).await?;
                }
            }
        }

        info!(bankroll = self.session.bankroll(), "shell.stop");
        Ok(())
    }
}

async fn say(out: &mut tokio::io::Stdout, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}
