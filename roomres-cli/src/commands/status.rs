//! Status changes: `approve`, `reject`, `cancel`.

use clap::Args;
use roomres::operations::TransitionOptions;
use roomres::ReservationStatus;

use crate::error::CliError;
use crate::utils::{current_actor, open_service, print_warnings, GlobalOptions};

/// Move a reservation to a new status.
#[derive(Args)]
pub struct StatusCommand {
    /// Reservation id
    pub id: i64,

    /// Notes for the requester (recorded for administrators only)
    #[arg(long)]
    pub notes: Option<String>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl StatusCommand {
    /// Execute the status change to `status`.
    pub fn execute(self, global: &GlobalOptions, status: ReservationStatus) -> Result<(), CliError> {
        let mut service = open_service(global)?;
        let actor = current_actor(global, &service)?;

        let options = TransitionOptions::new(self.id, actor, status).with_notes(self.notes);
        let result = service.transition(options, self.dry_run)?;

        if self.dry_run && !global.quiet {
            eprintln!("Dry run - would perform the following actions:");
            for (i, action) in result.actions_taken.iter().enumerate() {
                eprintln!("  {}. {action}", i + 1);
            }
        }
        print_warnings(global, &result.warnings);
        if !self.dry_run && !global.quiet {
            eprintln!("Reservation #{} is now {status}", self.id);
        }

        Ok(())
    }
}
