//! Weekly class timetable: `schedule add`, `schedule list`, `schedule remove`.

use chrono::{NaiveTime, Weekday};
use clap::{Args, Subcommand};
use roomres::schedule::parse_weekday;
use roomres::{NewClassSchedule, TimeRange};

use crate::error::CliError;
use crate::output::{print_records, FormatArg};
use crate::utils::{current_actor, open_service, time_arg, GlobalOptions};

/// Manage the weekly class timetable.
#[derive(Args)]
pub struct ScheduleCommand {
    #[command(subcommand)]
    pub action: ScheduleAction,
}

/// Schedule subcommands.
#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Add a weekly class (admins, or instructors for themselves)
    Add {
        /// Room id
        #[arg(long)]
        room: i64,

        /// Day of week, e.g. monday or mon
        #[arg(long, value_parser = day_arg)]
        day: Weekday,

        /// Start time (HH:MM)
        #[arg(long, value_parser = time_arg)]
        start: NaiveTime,

        /// End time (HH:MM)
        #[arg(long, value_parser = time_arg)]
        end: NaiveTime,

        /// Course code, e.g. CS101
        #[arg(long)]
        course_code: String,

        /// Course title
        #[arg(long)]
        course_name: String,

        /// Teaching user id (default: the caller)
        #[arg(long, value_name = "USER_ID")]
        instructor: Option<i64>,
    },

    /// List classes
    List {
        /// Only classes in this room
        #[arg(long)]
        room: Option<i64>,

        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<FormatArg>,
    },

    /// Remove a class
    Remove {
        /// Schedule id
        id: i64,
    },
}

fn day_arg(value: &str) -> Result<Weekday, String> {
    parse_weekday(value).map_err(|e| e.message)
}

impl ScheduleCommand {
    /// Execute the schedule command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut service = open_service(global)?;

        match self.action {
            ScheduleAction::Add {
                room,
                day,
                start,
                end,
                course_code,
                course_name,
                instructor,
            } => {
                let actor = current_actor(global, &service)?;
                let schedule = service.add_schedule(
                    actor,
                    NewClassSchedule {
                        room_id: room,
                        instructor_id: instructor.unwrap_or(actor.user_id),
                        course_code,
                        course_name,
                        day_of_week: day,
                        time_range: TimeRange::new(start, end)?,
                    },
                )?;
                println!("{}", schedule.id);
            }
            ScheduleAction::List { room, format } => {
                let slots = service.schedules(room)?;
                let format = format.map_or_else(|| service.config().output_format(), Into::into);
                print_records(&slots, format)?;
            }
            ScheduleAction::Remove { id } => {
                let actor = current_actor(global, &service)?;
                service.remove_schedule(actor, id)?;
                if !global.quiet {
                    eprintln!("Removed class #{id}");
                }
            }
        }

        Ok(())
    }
}
