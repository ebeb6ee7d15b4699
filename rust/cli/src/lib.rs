//! # Cribbage CLI Library
//!
//! Command-line front end for the cribbage match engine. The primary entry
//! point is [`run`], which parses arguments and dispatches to a subcommand.
//!
//! ## Example Usage
//!
//! ```
//! use std::io;
//! let args = vec!["cribbage", "deal", "--seed", "42"];
//! let code = cribbage_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `deal`: Cut for dealer and deal a single hand
//! - `sim`: Play matches to pegging and audit card conservation
//! - `cfg`: Display current configuration settings
//! - `rng`: Inspect the deck RNG stream

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;

pub mod cli;
mod commands;
pub mod config;
pub mod driver;
mod error;
pub mod exit_code;
pub mod io_utils;
pub mod logging;
pub mod ui;

use cli::{Commands, CribbageCli};
use commands::{handle_cfg_command, handle_deal_command, handle_rng_command, handle_sim_command};

pub use error::CliError;

const COMMANDS: &[&str] = &["deal", "sim", "cfg", "rng"];

/// Parses `args` and runs the selected subcommand.
///
/// Returns the process exit code: [`exit_code::SUCCESS`] or
/// [`exit_code::ERROR`]. Help and version go to `out` and exit with success.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match CribbageCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Deal { seed } => handle_deal_command(seed, out),
        Commands::Sim {
            matches,
            seed,
            output,
        } => handle_sim_command(matches, output, seed, out, err),
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Rng { seed } => handle_rng_command(seed, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Cribbage CLI");
            write_or_exit!(err, "Usage: cribbage <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: cribbage --help");
            exit_code::ERROR
        }
    }
}
