//! Subcommands of the `menace` binary

pub mod bandit;
pub mod train;
