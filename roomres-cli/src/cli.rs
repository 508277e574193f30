//! CLI structure and command definitions.
//!
//! Defines the top-level parser with clap's derive macros: global options
//! shared by every command, and the subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    CanDeleteCommand, CheckCommand, CompletionsCommand, DeleteCommand, InboxCommand, InitCommand,
    ListCommand, ReserveCommand, RoomCommand, ScheduleCommand, ShowCommand, ShowDataDirCommand,
    StatusCommand, UserCommand,
};

/// Command-line tool for department room reservations.
#[derive(Parser)]
#[command(name = "roomres")]
#[command(version, about = "Request, approve and manage department room reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "ROOMRES_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the database busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "ROOMRES_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "ROOMRES_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    /// Access token identifying the caller
    #[arg(long, value_name = "TOKEN", global = true, env = "ROOMRES_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Show the resolved data directory path
    ShowDataDir(ShowDataDirCommand),

    /// Manage user accounts
    User(UserCommand),

    /// Manage rooms
    Room(RoomCommand),

    /// Manage the weekly class timetable
    Schedule(ScheduleCommand),

    /// Show what occupies a room during a slot
    Check(CheckCommand),

    /// Request a room for a time slot
    Reserve(ReserveCommand),

    /// Approve a pending reservation (admin only)
    Approve(StatusCommand),

    /// Reject a pending reservation (admin only)
    Reject(StatusCommand),

    /// Cancel a pending or approved reservation
    Cancel(StatusCommand),

    /// List reservations
    List(ListCommand),

    /// Show one reservation
    Show(ShowCommand),

    /// Delete a reservation from history
    Delete(DeleteCommand),

    /// Check whether a reservation may be deleted from history
    CanDelete(CanDeleteCommand),

    /// Read notifications
    Inbox(InboxCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
