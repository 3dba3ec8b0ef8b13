//! # till CLI Library
//!
//! The `till` command: catalog maintenance, one-shot checkouts and an
//! interactive till session.
//!
//! ## Module Organization
//! ```text
//! till_cli/
//! ├── lib.rs          ◄─── You are here (argument parsing, logging, dispatch)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── TillConfig (TOML + env overrides)
//! │   └── session.rs  ◄─── SessionState (catalog + checkout)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Shared catalog loading
//! │   ├── catalog.rs  ◄─── catalog list / export
//! │   ├── checkout.rs ◄─── one-shot checkout
//! │   └── session.rs  ◄─── interactive session
//! └── error.rs        ◄─── CliError, ErrorCode, exit codes
//! ```

pub mod commands;
pub mod error;
pub mod state;

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use commands::catalog::CatalogCommand;
use commands::checkout::CheckoutArgs;
use commands::session::SessionArgs;
use error::CliResult;
use state::TillConfig;

/// Checkout pricing at the till.
#[derive(Debug, Parser)]
#[command(name = "till", version, about)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect or re-export a catalog file
    #[command(subcommand)]
    Catalog(CatalogCommand),

    /// Scan items given as arguments and print the receipt
    Checkout(CheckoutArgs),

    /// Run an interactive till reading commands from stdin
    Session(SessionArgs),
}

/// Runs the `till` binary.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Startup                                           │
/// │                                                                         │
/// │  1. Parse arguments (clap exits on --help / usage errors)              │
/// │  2. Initialize logging (stderr, RUST_LOG or -v)                        │
/// │  3. Load TillConfig (file → env)                                       │
/// │  4. Dispatch the subcommand                                            │
/// │  5. Map any CliError to "error[CODE]: message" and an exit status      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = %err.code(), "{}", err);
            eprintln!("error[{}]: {}", err.code(), err);
            ExitCode::from(err.exit_code())
        }
    }
}

/// Loads config and runs the parsed command against stdin/stdout.
pub fn execute(cli: &Cli) -> CliResult<()> {
    let config = TillConfig::load(cli.config.as_deref())?;
    debug!(store_name = %config.store_name, "Config loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Catalog(command) => commands::catalog::run(command, &config, &mut out)?,
        Command::Checkout(args) => commands::checkout::run(args, &config, &mut out)?,
        Command::Session(args) => {
            let stdin = io::stdin();
            commands::session::run(args, &config, stdin.lock(), &mut out)?
        }
    }

    out.flush()?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so receipts and JSON on stdout stay clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=till_catalog=trace` - Trace one crate only
/// - `-v` - Debug for everything
/// - Default: `info,till=debug`
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,till=debug"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
