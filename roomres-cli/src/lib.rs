//! Library exports for roomres-cli.
//!
//! Exposes the CLI structure so the build script and tests can reach it.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod utils;

// Re-export CLI for build script
pub use cli::Cli;
