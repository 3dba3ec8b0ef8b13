//! # Interactive Session
//!
//! `till session`: a till driven by line commands on stdin.
//!
//! ```text
//! till> promo CHIPS 1 1
//! Promotion for CHIPS: buy 1 get 1 free
//! till> scan CHIPS 3
//! Scanned 3 x Bag of Chips
//! till> scan RICE 2.5
//! Scanned 2.5 kg Rice (kg)
//! till> total
//! ===== Grocery Store Receipt =====
//! ...
//! till> reset
//! ```
//!
//! Bad commands and failed scans print an error and the session carries on.
//! Only I/O failures end it early.

use clap::Args;
use std::io::{BufRead, Write};
use std::str::FromStr;

use till_core::{Promotion, ScanQuantity};

use super::checkout::parse_promotion;
use super::CatalogSource;
use crate::error::{CliError, CliResult};
use crate::state::{SessionState, TillConfig};

const PROMPT: &str = "till> ";

const HELP: &str = "\
Commands:
  scan ID AMOUNT       scan a product (count for PIECE, kg for WEIGHT)
  promo ID BUY FREE    register a buy-BUY-get-FREE promotion
  total                print the receipt for the current scans
  reset                clear all scans and start a new session
  help                 show this help
  quit                 leave the till";

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(flatten)]
    pub source: CatalogSource,

    /// Promotion as ID:BUY:FREE (repeatable, overrides configured promotions)
    #[arg(long = "promo", value_name = "ID:BUY:FREE", value_parser = parse_promotion)]
    pub promotions: Vec<Promotion>,
}

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Scan { id: String, amount: String },
    Promo(Promotion),
    Total,
    Reset,
    Help,
    Quit,
    Empty,
}

impl FromStr for SessionCommand {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, args)) = words.split_first() else {
            return Ok(SessionCommand::Empty);
        };

        match (verb.to_lowercase().as_str(), args) {
            ("scan", [id, amount]) => Ok(SessionCommand::Scan {
                id: id.to_string(),
                amount: amount.to_string(),
            }),
            ("scan", _) => Err(CliError::invalid_argument("usage: scan ID AMOUNT")),
            ("promo", [id, buy, free]) => parse_promotion(&format!("{}:{}:{}", id, buy, free))
                .map(SessionCommand::Promo)
                .map_err(CliError::InvalidArgument),
            ("promo", _) => Err(CliError::invalid_argument("usage: promo ID BUY FREE")),
            ("total", []) => Ok(SessionCommand::Total),
            ("reset", []) => Ok(SessionCommand::Reset),
            ("help" | "?", _) => Ok(SessionCommand::Help),
            ("quit" | "exit", _) => Ok(SessionCommand::Quit),
            _ => Err(CliError::invalid_argument(format!(
                "unknown command '{}' (try 'help')",
                line.trim()
            ))),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

fn apply(
    state: &mut SessionState,
    command: SessionCommand,
    out: &mut impl Write,
) -> CliResult<Flow> {
    match command {
        SessionCommand::Scan { id, amount } => {
            let item = state.scan(&id, &amount)?;
            match item.quantity() {
                ScanQuantity::Pieces(count) => {
                    writeln!(out, "Scanned {} x {}", count, item.product().name())?
                }
                ScanQuantity::Weight(weight) => {
                    writeln!(out, "Scanned {} kg {}", weight, item.product().name())?
                }
            }
        }
        SessionCommand::Promo(promotion) => {
            let line = format!(
                "Promotion for {}: buy {} get {} free",
                promotion.product_id(),
                promotion.buy(),
                promotion.free()
            );
            match state.add_promotion(promotion) {
                Some(_) => writeln!(out, "{} (replaced previous)", line)?,
                None => writeln!(out, "{}", line)?,
            }
        }
        SessionCommand::Total => {
            let result = state.totals();
            write!(out, "{}", state.receipt(&result))?;
        }
        SessionCommand::Reset => {
            state.reset();
            writeln!(out, "Session reset ({})", state.session_id())?;
        }
        SessionCommand::Help => writeln!(out, "{}", HELP)?,
        SessionCommand::Quit => return Ok(Flow::Quit),
        SessionCommand::Empty => {}
    }
    Ok(Flow::Continue)
}

/// Reads commands from `input` until `quit` or end of input.
pub fn run_session<R: BufRead, W: Write>(
    state: &mut SessionState,
    input: R,
    out: &mut W,
) -> CliResult<()> {
    writeln!(
        out,
        "Session {} started with {} products. Type 'help' for commands.",
        state.session_id(),
        state.catalog().len()
    )?;

    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;

        let flow = line
            .parse::<SessionCommand>()
            .and_then(|command| apply(state, command, out));

        match flow {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(CliError::Io(e)) => return Err(CliError::Io(e)),
            Err(e) => writeln!(out, "error[{}]: {}", e.code(), e)?,
        }
    }

    Ok(())
}

pub fn run(
    args: &SessionArgs,
    config: &TillConfig,
    input: impl BufRead,
    out: &mut impl Write,
) -> CliResult<()> {
    let catalog = args.source.load(config)?;
    let mut state = SessionState::new(catalog, config)?;

    for promotion in &args.promotions {
        state.add_promotion(promotion.clone());
    }

    run_session(&mut state, input, out)
}
