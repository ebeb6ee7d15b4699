//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "cribbage",
    version,
    about = "Cribbage match engine CLI",
    propagate_version = true
)]
pub struct CribbageCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cut for dealer and deal one hand
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play matches up to pegging with random legal choices
    Sim {
        #[arg(long, default_value_t = 100)]
        matches: u64,
        #[arg(long)]
        seed: Option<u64>,
        /// JSONL file receiving one match record per line
        #[arg(long)]
        output: Option<String>,
    },
    /// Show resolved configuration and where each value came from
    Cfg,
    /// Print a sample of the deck RNG stream
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
}
