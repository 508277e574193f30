//! Main entry point for the roomres CLI.
//!
//! Students and instructors request rooms, administrators approve or
//! reject requests and maintain rooms and the class timetable. Run
//! `roomres --help` for the command list.

mod cli;
mod commands;
mod error;
mod output;
mod utils;

use clap::Parser;
use cli::{Cli, Command};
use roomres::ReservationStatus;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _level = roomres::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
        token: cli.token,
    };

    let result = match cli.command {
        Command::Init(cmd) => cmd.execute(&global),
        Command::ShowDataDir(cmd) => cmd.execute(&global),
        Command::User(cmd) => cmd.execute(&global),
        Command::Room(cmd) => cmd.execute(&global),
        Command::Schedule(cmd) => cmd.execute(&global),
        Command::Check(cmd) => cmd.execute(&global),
        Command::Reserve(cmd) => cmd.execute(&global),
        Command::Approve(cmd) => cmd.execute(&global, ReservationStatus::Approved),
        Command::Reject(cmd) => cmd.execute(&global, ReservationStatus::Rejected),
        Command::Cancel(cmd) => cmd.execute(&global, ReservationStatus::Cancelled),
        Command::List(cmd) => cmd.execute(&global),
        Command::Show(cmd) => cmd.execute(&global),
        Command::Delete(cmd) => cmd.execute(&global),
        Command::CanDelete(cmd) => cmd.execute(&global),
        Command::Inbox(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            if let error::CliError::Library(lib) = &e {
                if let Some(conflicts) = lib.conflicts() {
                    for conflict in conflicts {
                        eprintln!("  - {conflict}");
                    }
                }
            }
            std::process::exit(e.exit_code());
        }
    }
}
