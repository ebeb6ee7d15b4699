//! Process exit codes returned by [`run`](crate::run).
//!
//! Every failure (bad arguments, invalid configuration, an engine rejection
//! or a broken card conservation audit during `sim`) maps to [`ERROR`].

/// Command finished normally. Also used for `--help` and `--version`.
pub const SUCCESS: i32 = 0;

/// Any failure; the reason has already been written to stderr.
pub const ERROR: i32 = 2;
