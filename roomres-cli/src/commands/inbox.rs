//! In-app notifications: `inbox list`, `inbox read`.

use clap::{Args, Subcommand};

use crate::error::CliError;
use crate::output::{print_records, FormatArg};
use crate::utils::{current_actor, open_service, GlobalOptions};

/// Read your notifications.
#[derive(Args)]
pub struct InboxCommand {
    #[command(subcommand)]
    pub action: InboxAction,
}

/// Inbox subcommands.
#[derive(Subcommand)]
pub enum InboxAction {
    /// List notifications, newest first
    List {
        /// Only unread notifications
        #[arg(long)]
        unread: bool,

        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<FormatArg>,
    },

    /// Mark one notification, or all of them, as read
    Read {
        /// Notification id (default: all)
        id: Option<i64>,
    },
}

impl InboxCommand {
    /// Execute the inbox command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut service = open_service(global)?;
        let actor = current_actor(global, &service)?;

        match self.action {
            InboxAction::List { unread, format } => {
                let notifications = service.notifications(actor, unread)?;
                let format = format.map_or_else(|| service.config().output_format(), Into::into);
                print_records(&notifications, format)?;
            }
            InboxAction::Read { id } => {
                let marked = service.mark_notifications_read(actor, id)?;
                if !global.quiet {
                    eprintln!("Marked {marked} notification(s) as read");
                }
            }
        }
        Ok(())
    }
}
