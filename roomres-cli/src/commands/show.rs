//! Show command: one reservation.

use clap::Args;

use crate::error::CliError;
use crate::output::{print_records, FormatArg, ReservationView};
use crate::utils::{current_actor, open_service, GlobalOptions};

/// Show a reservation you own (admins: any reservation).
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation id
    pub id: i64,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let service = open_service(global)?;
        let actor = current_actor(global, &service)?;

        let reservation = service.reservation(actor, self.id)?;
        let view = ReservationView::new(&reservation, service.now());

        let format = self
            .format
            .map_or_else(|| service.config().output_format(), Into::into);
        print_records(&[view], format)
    }
}
