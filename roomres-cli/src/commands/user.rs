//! Account management: `user add`, `user list`, `user whoami`.

use clap::{Args, Subcommand};
use roomres::{Classification, NewUser, Role};

use crate::error::CliError;
use crate::output::{print_records, FormatArg};
use crate::utils::{current_actor, open_service, optional_actor, GlobalOptions};

/// Manage user accounts.
#[derive(Args)]
pub struct UserCommand {
    #[command(subcommand)]
    pub action: UserAction,
}

/// User subcommands.
#[derive(Subcommand)]
pub enum UserAction {
    /// Create an account and print its access token
    Add(UserAddArgs),

    /// List accounts (admin only)
    List {
        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<FormatArg>,
    },

    /// Show the account the token belongs to
    Whoami {
        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<FormatArg>,
    },
}

/// Arguments for `user add`.
#[derive(Args)]
pub struct UserAddArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Unique email address
    #[arg(long)]
    pub email: String,

    /// Role: student, instructor or admin
    #[arg(long, default_value = "student")]
    pub role: Role,

    /// Course, used as the default for the user's requests
    #[arg(long)]
    pub course: Option<String>,

    /// Year level
    #[arg(long)]
    pub year: Option<String>,

    /// Block or section
    #[arg(long)]
    pub block: Option<String>,
}

impl UserCommand {
    /// Execute the user command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut service = open_service(global)?;

        match self.action {
            UserAction::Add(args) => {
                // The first account needs no token
                let actor = optional_actor(global, &service)?;
                let user = NewUser::new(args.name, args.email, args.role).with_classification(
                    Classification {
                        course: args.course,
                        year: args.year,
                        block: args.block,
                    },
                );
                let (user, token) = service.add_user(actor, user)?;
                if !global.quiet {
                    eprintln!("Created {} #{} ({})", user.role, user.id, user.email);
                }
                println!("{token}");
            }
            UserAction::List { format } => {
                let actor = current_actor(global, &service)?;
                let users = service.users(actor)?;
                let format = format.map_or_else(|| service.config().output_format(), Into::into);
                print_records(&users, format)?;
            }
            UserAction::Whoami { format } => {
                let actor = current_actor(global, &service)?;
                let me = service.user(actor)?;
                let format = format.map_or_else(|| service.config().output_format(), Into::into);
                print_records(&[me], format)?;
            }
        }

        Ok(())
    }
}
