//! Init command implementation.
//!
//! Explicitly initializes the data directory and database, optionally
//! writing a configuration template and creating the first administrator.

use clap::Args;
use roomres::database::DATABASE_FILE;
use roomres::operations::{init_database, InitOptions};
use roomres::{NewUser, Role};

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};

/// Initialize the roomres data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Overwrite an existing database
    #[arg(long)]
    overwrite: bool,

    /// Create a commented configuration file
    #[arg(long)]
    with_config: bool,

    /// Name of the first administrator account
    #[arg(long, value_name = "NAME", requires = "admin_email")]
    admin_name: Option<String>,

    /// Email of the first administrator account
    #[arg(long, value_name = "EMAIL", requires = "admin_name")]
    admin_email: Option<String>,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--disable-autoinit` has no effect here; this command always creates.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize roomres in: {}", data_dir.display());

            if data_dir.exists() {
                println!("  - Data directory already exists: {}", data_dir.display());
            } else {
                println!("  - Create data directory: {}", data_dir.display());
            }

            let db_path = data_dir.join(DATABASE_FILE);
            match (db_path.exists(), self.overwrite) {
                (true, true) => println!("  - Recreate database: {}", db_path.display()),
                (true, false) => println!(
                    "  - ERROR: Database already exists (use --overwrite to replace): {}",
                    db_path.display()
                ),
                (false, _) => println!("  - Create database: {}", db_path.display()),
            }

            if self.with_config {
                println!(
                    "  - Create configuration file if missing: {}",
                    data_dir.join("config.yaml").display()
                );
            }
            if let Some(name) = &self.admin_name {
                println!("  - Create administrator: {name}");
            }
            return Ok(());
        }

        let admin = match (self.admin_name, self.admin_email) {
            (Some(name), Some(email)) => Some(NewUser::new(name, email, Role::Admin)),
            _ => None,
        };
        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config)
            .with_admin(admin);

        let result = init_database(&options).map_err(CliError::from)?;

        println!("Initialized roomres in: {}", result.data_dir.display());
        if result.data_dir_created {
            println!("  - Created data directory");
        }
        if result.database_created {
            if self.overwrite {
                println!("  - Recreated database");
            } else {
                println!("  - Created database");
            }
        }
        if result.config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }
        if let Some((admin, token)) = result.admin {
            println!("  - Created administrator #{} ({})", admin.id, admin.email);
            println!("  - Access token: {token}");
        }

        Ok(())
    }
}
