//! Simulation command: play many matches from the lobby to pegging.
//!
//! Match `i` is seeded with `base_seed + i`, so any single match from a run
//! can be replayed with `deal --seed`. Card conservation is audited after
//! every action; the first violation aborts the run.

use crate::config;
use crate::driver;
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::ui;
use cribbage_engine::logger::{MatchAction, MatchLogger};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

/// Totals reported once a run finishes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SimSummary {
    pub matches: u64,
    pub actions: usize,
    /// Cuts beyond the first one per seat, caused by ties
    pub cut_redraws: usize,
    /// How often each seat won the cut for dealer
    pub first_dealers: BTreeMap<String, u64>,
}

pub fn handle_sim_command(
    matches: u64,
    output: Option<String>,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if matches == 0 {
        ui::write_error(err, "matches must be >= 1")?;
        return Err(CliError::InvalidInput("matches must be >= 1".to_string()));
    }
    let cfg = match config::load() {
        Ok(c) => c,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(e.to_string()));
        }
    };

    let base_seed = match seed.or(cfg.seed) {
        Some(s) => s,
        None => {
            let s = rand::random();
            ui::display_warning(err, &format!("no seed given, using {}", s))?;
            s
        }
    };

    let mut logger = match output.map(PathBuf::from) {
        Some(path) => {
            if let Err(e) = ensure_parent_dir(&path) {
                ui::write_error(err, &e)?;
                return Err(CliError::Io(std::io::Error::other(e)));
            }
            match MatchLogger::create(&path) {
                Ok(l) => Some(l),
                Err(e) => {
                    ui::write_error(err, &format!("Failed to open output file: {}", e))?;
                    return Err(CliError::Io(e));
                }
            }
        }
        None => None,
    };

    let mut summary = SimSummary::default();
    for i in 0..matches {
        let match_seed = base_seed.wrapping_add(i);
        let id = match logger.as_mut() {
            Some(l) => l.next_id(),
            None => format!("sim-{:06}", i + 1),
        };
        let engine = driver::play_to_pegging(&id, cfg.match_config(Some(match_seed)))?;

        let record = engine.match_record();
        summary.matches += 1;
        summary.actions += record.actions.len();
        let cuts = record
            .actions
            .iter()
            .filter(|a| matches!(a.action, MatchAction::CutForDealer { .. }))
            .count();
        summary.cut_redraws += cuts.saturating_sub(engine.players().len());
        if let Some(dealer) = engine.current_dealer() {
            *summary.first_dealers.entry(dealer.to_string()).or_default() += 1;
        }

        if let Some(l) = logger.as_mut() {
            l.write(&record)?;
        }
    }

    write_summary(&summary, base_seed, out)?;
    Ok(())
}

fn write_summary(summary: &SimSummary, base_seed: u64, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(
        out,
        "Simulated: {} matches (seed {})",
        summary.matches, base_seed
    )?;
    writeln!(out, "Actions: {}", summary.actions)?;
    writeln!(out, "Cut redraws: {}", summary.cut_redraws)?;
    let dealers: Vec<String> = summary
        .first_dealers
        .iter()
        .map(|(id, n)| format!("{}={}", id, n))
        .collect();
    writeln!(out, "First dealer: {}", dealers.join(" "))?;
    writeln!(out, "Conservation: ok")?;
    Ok(())
}
