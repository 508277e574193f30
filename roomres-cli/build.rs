//! Build script for roomres-cli.
//!
//! Generates the man page at build time using clap_mangen and places it in
//! OUT_DIR for inclusion in release builds.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! tree is restated here in minimal form.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("roomres")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Request, approve and manage department room reservations")
        .long_about(
            "Command-line tool for department room reservations: booking requests checked \
             against existing reservations and the weekly class timetable, an approval \
             workflow, and history retention",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("ROOMRES_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the database busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("ROOMRES_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .env("ROOMRES_DISABLE_AUTOINIT"),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .help("Access token identifying the caller")
                .value_name("TOKEN")
                .global(true)
                .env("ROOMRES_TOKEN"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the database, an optional configuration file and the first administrator"),
            Command::new("show-data-dir").about("Show the resolved data directory path"),
            Command::new("user")
                .about("Manage user accounts")
                .long_about("Add accounts, list them, or show the account behind a token"),
            Command::new("room")
                .about("Manage rooms")
                .long_about("Add, update, delete, list and show rooms, and open or close them for new bookings"),
            Command::new("schedule")
                .about("Manage the weekly class timetable")
                .long_about("Add, list and remove recurring classes that block rooms every week"),
            Command::new("check")
                .about("Show what occupies a room during a slot")
                .long_about("List reservations and classes overlapping a date and time range"),
            Command::new("reserve")
                .about("Request a room for a time slot")
                .long_about("Submit a pending reservation; fails listing every overlapping booking"),
            Command::new("approve").about("Approve a pending reservation (admin only)"),
            Command::new("reject").about("Reject a pending reservation (admin only)"),
            Command::new("cancel").about("Cancel a pending or approved reservation"),
            Command::new("list")
                .about("List reservations")
                .long_about("Display reservations in table, JSON, CSV or TSV form"),
            Command::new("show").about("Show one reservation"),
            Command::new("delete")
                .about("Delete a reservation from history")
                .long_about("Hard-delete a rejected, cancelled or finished reservation"),
            Command::new("can-delete").about("Check whether a reservation may be deleted from history"),
            Command::new("inbox")
                .about("Read notifications")
                .long_about("List notifications about your reservations and mark them as read"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("roomres.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
