//! # Checkout Command
//!
//! `till checkout`: load a catalog, scan everything given on the command
//! line, print the receipt.
//!
//! ```text
//! till checkout --catalog products.csv \
//!     --promo CHIPS:1:1 \
//!     --scan CHIPS=3 --scan RICE=2.5
//! ```

use clap::Args;
use std::io::Write;
use std::str::FromStr;

use till_core::Promotion;

use super::CatalogSource;
use crate::error::CliResult;
use crate::state::{SessionState, TillConfig};

/// One `--scan ID=AMOUNT` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanArg {
    pub id: String,
    pub amount: String,
}

impl FromStr for ScanArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, amount) = s
            .split_once('=')
            .ok_or_else(|| format!("expected ID=AMOUNT, got '{}'", s))?;
        let (id, amount) = (id.trim(), amount.trim());

        if id.is_empty() || amount.is_empty() {
            return Err(format!("expected ID=AMOUNT, got '{}'", s));
        }

        Ok(ScanArg {
            id: id.to_string(),
            amount: amount.to_string(),
        })
    }
}

/// Parses `ID:BUY:FREE` into a promotion.
pub fn parse_promotion(s: &str) -> Result<Promotion, String> {
    let mut parts = s.rsplitn(3, ':');
    let (free, buy, id) = match (parts.next(), parts.next(), parts.next()) {
        (Some(free), Some(buy), Some(id)) => (free, buy, id),
        _ => return Err(format!("expected ID:BUY:FREE, got '{}'", s)),
    };

    let buy = buy
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid buy count '{}': {}", buy, e))?;
    let free = free
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid free count '{}': {}", free, e))?;

    Promotion::new(id.trim(), buy, free).map_err(|e| e.to_string())
}

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    #[command(flatten)]
    pub source: CatalogSource,

    /// Promotion as ID:BUY:FREE (repeatable, overrides configured promotions)
    #[arg(long = "promo", value_name = "ID:BUY:FREE", value_parser = parse_promotion)]
    pub promotions: Vec<Promotion>,

    /// Item to scan as ID=AMOUNT; AMOUNT is a count or a weight in kg (repeatable)
    #[arg(long = "scan", value_name = "ID=AMOUNT", required = true)]
    pub scans: Vec<ScanArg>,

    /// Print the checkout result as JSON instead of a receipt
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &CheckoutArgs, config: &TillConfig, out: &mut impl Write) -> CliResult<()> {
    let catalog = args.source.load(config)?;
    let mut state = SessionState::new(catalog, config)?;

    for promotion in &args.promotions {
        state.add_promotion(promotion.clone());
    }
    for scan in &args.scans {
        state.scan(&scan.id, &scan.amount)?;
    }

    let result = state.totals();
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &result)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", state.receipt(&result))?;
    }
    Ok(())
}
