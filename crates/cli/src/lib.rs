//! CLI tool for drawing Chord ring snapshots.
//!
//! Provides commands for:
//! - Animating a snapshot sequence (interactive player, looping export)
//! - Rendering a single snapshot as a still image
//! - Inspecting per-snapshot node and edge counts

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
