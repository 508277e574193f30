//! Data directory initialization.
//!
//! Creates the data directory and database, optionally writes a commented
//! configuration template, and can create the first administrator account.

use std::fs;
use std::path::PathBuf;

use crate::database::{Database, DatabaseConfig, DATABASE_FILE};
use crate::error::{Error, Result};
use crate::user::{NewUser, Role, User};

/// Options for initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write `config.yaml` if missing.
    pub create_config: bool,
    /// First administrator to create.
    pub admin: Option<NewUser>,
}

impl InitOptions {
    /// Creates options for `data_dir`.
    #[must_use]
    pub const fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
            admin: None,
        }
    }

    /// Sets whether to replace an existing database.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to write the configuration template.
    #[must_use]
    pub const fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }

    /// Creates `admin` as the first account. Its role is forced to admin.
    #[must_use]
    pub fn with_admin(mut self, admin: Option<NewUser>) -> Self {
        self.admin = admin.map(|mut user| {
            user.role = Role::Admin;
            user
        });
        self
    }
}

/// Result of initialization.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether the database was created or recreated.
    pub database_created: bool,
    /// Whether a configuration file was written.
    pub config_created: bool,
    /// Path to the data directory.
    pub data_dir: PathBuf,
    /// The administrator created, with their access token.
    pub admin: Option<(User, String)>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# roomres configuration

# Seconds to wait for the database write lock (default: 5)
# maximum_lock_wait_seconds: 5

# notifications:
#   enabled: true
#   sink: inbox        # inbox | log | none

# booking:
#   require_available_room: true

# output_format: table  # table | json | csv | tsv
";

/// Initializes the data directory and database.
///
/// # Errors
///
/// Returns an error if the directory or database cannot be created, the
/// database exists and `overwrite` is off, or the administrator is invalid.
///
/// # Examples
///
/// ```no_run
/// use roomres::operations::{init_database, InitOptions};
/// use roomres::{NewUser, Role};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/roomres-test"))
///     .with_create_config(true)
///     .with_admin(Some(NewUser::new("Registrar", "registrar@example.edu", Role::Admin)));
///
/// let result = init_database(&options).unwrap();
/// println!("admin token: {}", result.admin.unwrap().1);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        data_dir: options.data_dir.clone(),
        admin: None,
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE);
    let db_exists = db_path.exists();
    if db_exists && !options.overwrite {
        return Err(Error::Validation {
            field: "database".into(),
            message: format!(
                "Database already exists at {}. Use --overwrite to replace it.",
                db_path.display()
            ),
        });
    }
    if db_exists {
        fs::remove_file(&db_path)?;
        for suffix in ["-wal", "-shm"] {
            let sidecar = options.data_dir.join(format!("{DATABASE_FILE}{suffix}"));
            if sidecar.exists() {
                fs::remove_file(sidecar)?;
            }
        }
    }

    let mut db = Database::open(DatabaseConfig::new(&db_path))?;
    result.database_created = true;
    log::info!("initialized database at {}", db_path.display());

    if let Some(admin) = &options.admin {
        let tx = db.begin_transaction()?;
        let created = Database::insert_user(&tx, admin.clone())?;
        tx.commit()?;
        result.admin = Some(created);
    }

    if options.create_config {
        let config_path = options.data_dir.join("config.yaml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    Ok(result)
}
