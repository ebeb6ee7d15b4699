//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, each value paired with where
//! it came from:
//!
//! ```json
//! {
//!   "max_players": { "value": 2, "source": "default" },
//!   "cards_per_hand": { "value": 6, "source": "default" },
//!   "seed": { "value": 42, "source": "env" }
//! }
//! ```

use crate::config::{self, ConfigResolved};
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(e.to_string()));
        }
    };
    write_resolved(&resolved, out)
}

fn write_resolved(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "max_players": {
            "value": config.max_players,
            "source": sources.max_players,
        },
        "cards_per_hand": {
            "value": config.cards_per_hand,
            "source": sources.cards_per_hand,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
