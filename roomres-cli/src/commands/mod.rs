//! CLI command implementations.
//!
//! - `init`, `show-data-dir`: data directory setup
//! - `user`, `room`, `schedule`: accounts, rooms and the class timetable
//! - `check`, `reserve`: slot lookups and booking requests
//! - `approve`, `reject`, `cancel`: status changes
//! - `list`, `show`: reading reservations
//! - `delete`, `can-delete`: history retention
//! - `inbox`: notifications
//! - `completions`: shell completion scripts

pub mod check;
pub mod completions;
pub mod history;
pub mod inbox;
pub mod init;
pub mod list;
pub mod reserve;
pub mod room;
pub mod schedule;
pub mod show;
pub mod show_data_dir;
pub mod status;
pub mod user;

pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use history::{CanDeleteCommand, DeleteCommand};
pub use inbox::InboxCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use reserve::ReserveCommand;
pub use room::RoomCommand;
pub use schedule::ScheduleCommand;
pub use show::ShowCommand;
pub use show_data_dir::ShowDataDirCommand;
pub use status::StatusCommand;
pub use user::UserCommand;
