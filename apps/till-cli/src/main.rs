//! # till
//!
//! Command-line entry point. Setup and dispatch live in `lib.rs`.

use std::process::ExitCode;

fn main() -> ExitCode {
    till_cli::run()
}
