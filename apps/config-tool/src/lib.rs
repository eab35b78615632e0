//! Pieces of the `mctabim-config` binary that are worth testing on their own.

pub mod cli;
pub mod error;
pub mod logger;
