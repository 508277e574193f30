//! History retention: `delete` and `can-delete`.

use clap::Args;
use roomres::RetentionDecision;

use crate::error::CliError;
use crate::utils::{current_actor, open_service, GlobalOptions};

/// Permanently remove a reservation from your history.
#[derive(Args)]
pub struct DeleteCommand {
    /// Reservation id
    pub id: i64,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut service = open_service(global)?;
        let actor = current_actor(global, &service)?;

        service.delete_from_history(self.id, actor)?;
        if !global.quiet {
            eprintln!("Deleted reservation #{}", self.id);
        }
        Ok(())
    }
}

/// Check whether a reservation may be deleted from history.
///
/// Prints `allowed` or the reason it is kept; exits 1 when kept.
#[derive(Args)]
pub struct CanDeleteCommand {
    /// Reservation id
    pub id: i64,
}

impl CanDeleteCommand {
    /// Execute the can-delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let service = open_service(global)?;
        let actor = current_actor(global, &service)?;

        match service.can_delete_from_history(self.id, actor)? {
            RetentionDecision::Allowed => {
                println!("allowed");
                Ok(())
            }
            RetentionDecision::Denied(reason) => {
                println!("denied: {reason}");
                Err(CliError::SemanticFailure(format!(
                    "reservation #{} must be kept",
                    self.id
                )))
            }
        }
    }
}
