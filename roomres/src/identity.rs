//! Resolving a credential to an acting user.

use std::path::Path;

use crate::database::{Database, DatabaseConfig};
use crate::error::{Error, Result};
use crate::user::{Actor, User};

/// Verifies a credential and yields the caller's identity.
pub trait IdentityProvider {
    /// Resolves `credential` to the user it belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] for an unknown credential.
    fn authenticate(&self, credential: &str) -> Result<User>;

    /// Resolves `credential` to an [`Actor`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] for an unknown credential.
    fn actor(&self, credential: &str) -> Result<Actor> {
        self.authenticate(credential).map(|user| user.actor())
    }
}

/// Looks access tokens up in the users table.
#[derive(Debug)]
pub struct TokenDirectory {
    db: Database,
}

impl TokenDirectory {
    /// Wraps an open database.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Opens a read-only connection to the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Database::open(DatabaseConfig::new(path).read_only())?))
    }
}

impl IdentityProvider for TokenDirectory {
    fn authenticate(&self, credential: &str) -> Result<User> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(Error::Authentication);
        }
        Database::find_user_by_token(self.db.connection(), credential)?.ok_or(Error::Authentication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database_at;
    use crate::user::{NewUser, Role};

    #[test]
    fn test_token_resolves_to_actor() {
        let (db, config) = create_test_database_at();
        let (admin, token) = Database::insert_user(
            db.connection(),
            NewUser::new("Root", "root@example.edu", Role::Admin),
        )
        .unwrap();

        let directory = TokenDirectory::open(&config.path).unwrap();
        let actor = directory.actor(&format!(" {token} ")).unwrap();
        assert_eq!(actor, Actor::new(admin.id, Role::Admin));
    }

    #[test]
    fn test_unknown_or_blank_token_fails() {
        let (db, _) = create_test_database_at();
        let directory = TokenDirectory::new(db);
        assert!(matches!(directory.authenticate("bogus"), Err(Error::Authentication)));
        assert!(matches!(directory.authenticate("  "), Err(Error::Authentication)));
    }
}
