//! Command-line interface for the MENACE sandbox
//!
//! Commands print to stdout and never write files.

pub mod commands;
pub mod output;
