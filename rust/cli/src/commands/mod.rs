//! Command handlers, one module per subcommand.
//!
//! Each module exposes `handle_COMMAND_command`, takes its output streams as
//! `&mut dyn Write` and reports failures as [`CliError`](crate::error::CliError).

pub mod cfg;
pub mod deal;
pub mod rng;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use rng::handle_rng_command;
pub use sim::handle_sim_command;
