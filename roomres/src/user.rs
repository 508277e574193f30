//! Accounts, roles, and the acting identity passed into operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The role a user holds in the department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May request and cancel their own reservations.
    Student,
    /// Teaches scheduled classes; otherwise same rights as a student.
    Instructor,
    /// Approves and rejects requests and manages rooms.
    Admin,
}

impl Role {
    /// Returns the stored text form of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Instructor => "instructor",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "instructor" => Ok(Self::Instructor),
            "admin" => Ok(Self::Admin),
            other => Err(ValidationError::new(
                "role",
                format!("unknown role '{other}' (expected student, instructor or admin)"),
            )),
        }
    }
}

/// The authenticated caller of an operation.
///
/// # Examples
///
/// ```
/// use roomres::{Actor, Role};
///
/// let admin = Actor::new(1, Role::Admin);
/// let student = Actor::new(2, Role::Student);
/// assert!(admin.is_admin());
/// assert!(student.owns(2));
/// assert!(!student.owns(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Id of the acting user.
    pub user_id: i64,
    /// Role the user holds.
    pub role: Role,
}

impl Actor {
    /// Creates an actor.
    #[must_use]
    pub const fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Returns `true` for administrators.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Returns `true` if the actor is the user `owner_id`.
    #[must_use]
    pub const fn owns(&self, owner_id: i64) -> bool {
        self.user_id == owner_id
    }

    /// Returns `true` if the actor may act on a record owned by `owner_id`.
    #[must_use]
    pub fn is_owner_or_admin(&self, owner_id: i64) -> bool {
        self.owns(owner_id) || self.is_admin()
    }
}

/// Course, year and block a user or reservation belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Degree programme, e.g. `BSCS`.
    pub course: Option<String>,
    /// Year level.
    pub year: Option<String>,
    /// Section or block.
    pub block: Option<String>,
}

impl Classification {
    /// Returns `true` when no part is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.course.is_none() && self.year.is_none() && self.block.is_none()
    }

    /// Fills unset parts from `fallback`.
    #[must_use]
    pub fn or(self, fallback: &Self) -> Self {
        Self {
            course: self.course.or_else(|| fallback.course.clone()),
            year: self.year.or_else(|| fallback.year.clone()),
            block: self.block.or_else(|| fallback.block.clone()),
        }
    }

    pub(crate) fn normalized(self) -> Self {
        let clean = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        Self {
            course: clean(self.course),
            year: clean(self.year),
            block: clean(self.block),
        }
    }
}

/// A stored account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Row id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unique e-mail address.
    pub email: String,
    /// Role held.
    pub role: Role,
    /// Default classification copied onto new reservations.
    pub classification: Classification,
}

impl User {
    /// Returns the acting identity for this user.
    #[must_use]
    pub const fn actor(&self) -> Actor {
        Actor::new(self.id, self.role)
    }
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Unique e-mail address.
    pub email: String,
    /// Role to grant.
    pub role: Role,
    /// Default classification.
    pub classification: Classification,
}

impl NewUser {
    /// Creates the input with an empty classification.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
            classification: Classification::default(),
        }
    }

    /// Sets the default classification.
    #[must_use]
    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self
    }

    /// Trims and checks the fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name or a malformed e-mail.
    pub fn validate(self) -> Result<Self, ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::new("name", "name must not be empty"));
        }
        let email = self.email.trim().to_lowercase();
        let well_formed = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !well_formed {
            return Err(ValidationError::new(
                "email",
                format!("'{email}' is not an e-mail address"),
            ));
        }
        Ok(Self {
            name,
            email,
            role: self.role,
            classification: self.classification.normalized(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
        assert_eq!(Role::Instructor.to_string(), "instructor");
        let err = "janitor".parse::<Role>().unwrap_err();
        assert_eq!(err.field, "role");
    }

    #[test]
    fn test_actor_ownership() {
        let admin = Actor::new(1, Role::Admin);
        let student = Actor::new(2, Role::Student);
        assert!(admin.is_owner_or_admin(2));
        assert!(student.is_owner_or_admin(2));
        assert!(!student.is_owner_or_admin(3));
    }

    #[test]
    fn test_classification_fallback() {
        let own = Classification {
            course: Some("BSIT".into()),
            ..Classification::default()
        };
        let profile = Classification {
            course: Some("BSCS".into()),
            year: Some("2".into()),
            block: Some("A".into()),
        };
        let merged = own.or(&profile);
        assert_eq!(merged.course.as_deref(), Some("BSIT"));
        assert_eq!(merged.year.as_deref(), Some("2"));
        assert_eq!(merged.block.as_deref(), Some("A"));
    }

    #[test]
    fn test_new_user_validation() {
        let user = NewUser::new("  Ada Lovelace ", "ADA@Example.edu", Role::Student)
            .validate()
            .unwrap();
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.email, "ada@example.edu");

        assert!(NewUser::new(" ", "a@b.c", Role::Student).validate().is_err());
        let err = NewUser::new("Ada", "ada", Role::Student)
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "email");
    }

    #[test]
    fn test_blank_classification_normalized_away() {
        let c = Classification {
            course: Some("  ".into()),
            year: Some(" 3 ".into()),
            block: None,
        }
        .normalized();
        assert_eq!(c.course, None);
        assert_eq!(c.year.as_deref(), Some("3"));
    }
}
