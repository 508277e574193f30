//! Reserve command implementation.
//!
//! Submits a pending reservation request after checking the slot against
//! existing reservations and the class timetable.

use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use roomres::operations::ReserveOptions;
use roomres::{Classification, ReservationRequest, TimeRange};

use crate::error::CliError;
use crate::utils::{current_actor, date_arg, open_service, print_warnings, time_arg, GlobalOptions};

/// Request a room for a time slot.
#[derive(Args)]
pub struct ReserveCommand {
    /// Room id
    #[arg(long)]
    pub room: i64,

    /// Date (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub date: NaiveDate,

    /// Start time (HH:MM)
    #[arg(long, value_parser = time_arg)]
    pub start: NaiveTime,

    /// End time (HH:MM)
    #[arg(long, value_parser = time_arg)]
    pub end: NaiveTime,

    /// What the room is for
    #[arg(long)]
    pub purpose: String,

    /// Course (default: from the requester's profile)
    #[arg(long)]
    pub course: Option<String>,

    /// Year level (default: from the requester's profile)
    #[arg(long)]
    pub year: Option<String>,

    /// Block or section (default: from the requester's profile)
    #[arg(long)]
    pub block: Option<String>,

    /// Book on behalf of another user (admin only)
    #[arg(long = "for", value_name = "USER_ID")]
    pub for_user: Option<i64>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let range = TimeRange::new(self.start, self.end)?;
        let mut service = open_service(global)?;
        let actor = current_actor(global, &service)?;

        let requester = self.for_user.unwrap_or(actor.user_id);
        let request = ReservationRequest::builder(self.room, requester, self.date, range)
            .purpose(self.purpose)
            .classification(Classification {
                course: self.course,
                year: self.year,
                block: self.block,
            })
            .build()?;
        let options = ReserveOptions::new(request).with_actor(Some(actor));

        let result = service.reserve(options, self.dry_run)?;

        if self.dry_run {
            if !global.quiet {
                eprintln!("Dry run - would perform the following actions:");
                for (i, action) in result.actions_taken.iter().enumerate() {
                    eprintln!("  {}. {action}", i + 1);
                }
                if !result.warnings.is_empty() {
                    eprintln!("Warnings:");
                    for warning in &result.warnings {
                        eprintln!("  - {warning}");
                    }
                }
            }
            return Ok(());
        }

        // Just the id on stdout, for scripts
        if let Some(reservation) = &result.reservation {
            println!("{}", reservation.id());
        }
        print_warnings(global, &result.warnings);

        Ok(())
    }
}
