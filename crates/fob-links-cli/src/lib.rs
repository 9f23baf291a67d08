//! fob-links CLI library.
//!
//! Exposes the command-line pieces of `fob-links` so integration tests can
//! drive commands without spawning the binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;
pub mod watcher;
