//! Marquee CLI library
//!
//! Argument parsing, configuration loading and the command implementations
//! behind the `marquee` binary.

pub mod cli;
pub mod commands;
pub mod config;
