//! Check command: list everything occupying a slot.

use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use roomres::TimeRange;

use crate::error::CliError;
use crate::output::{print_records, FormatArg};
use crate::utils::{date_arg, open_service, time_arg, GlobalOptions};

/// Show reservations and classes that overlap a slot.
#[derive(Args)]
pub struct CheckCommand {
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

    /// Exit with status 1 when the slot is taken
    #[arg(long)]
    pub fail_on_conflict: bool,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let range = TimeRange::new(self.start, self.end)?;
        let service = open_service(global)?;
        let conflicts = service.check_conflicts(self.room, self.date, &range)?;

        let format = self
            .format
            .map_or_else(|| service.config().output_format(), Into::into);
        print_records(&conflicts, format)?;

        if self.fail_on_conflict && !conflicts.is_empty() {
            return Err(CliError::SemanticFailure(format!(
                "room {} is taken on {} at {range} ({} conflict(s))",
                self.room,
                self.date,
                conflicts.len()
            )));
        }
        Ok(())
    }
}
