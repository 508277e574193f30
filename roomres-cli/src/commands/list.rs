//! List command implementation.
//!
//! Displays reservations the caller may see in table, JSON, CSV or TSV
//! form. Statuses are shown as of now, so elapsed approved bookings read
//! `completed`.

use chrono::NaiveDate;
use clap::Args;
use roomres::{ReservationFilter, ReservationStatus};

use crate::error::CliError;
use crate::output::{print_records, FormatArg, ReservationView};
use crate::utils::{current_actor, date_arg, open_service, GlobalOptions};

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,

    /// Filter by room id
    #[arg(long, value_name = "ROOM_ID")]
    pub room: Option<i64>,

    /// Filter by date (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub date: Option<NaiveDate>,

    /// Filter by stored status
    #[arg(long)]
    pub status: Option<ReservationStatus>,

    /// Filter by requester (admins only; others always see their own)
    #[arg(long, value_name = "USER_ID")]
    pub user: Option<i64>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let service = open_service(global)?;
        let actor = current_actor(global, &service)?;

        let filter = ReservationFilter {
            user_id: self.user,
            room_id: self.room,
            date: self.date,
            status: self.status,
        };
        let now = service.now();
        let views: Vec<ReservationView> = service
            .reservations(actor, filter)?
            .iter()
            .map(|r| ReservationView::new(r, now))
            .collect();

        let format = self
            .format
            .map_or_else(|| service.config().output_format(), Into::into);
        print_records(&views, format)
    }
}
