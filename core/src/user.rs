//! Users and the persistence seam for them.

use crate::error::{Error, Result};
use crate::types::UserId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[allow(clippy::expect_used)] // Pattern is a literal; failure is a programmer error caught by tests
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_+&*-]+(?:\.[a-zA-Z0-9_+&*-]+)*@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,7}$")
        .expect("email pattern must compile")
});

/// A user with an id, display name, and validated email address.
///
/// Validation is eager: a `User` that exists has a well-formed email.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
}

impl User {
    /// Creates a user, validating the email format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `id` or `name` is empty or `email`
    /// is not a well-formed address.
    pub fn create(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let email = email.into();
        if id.is_empty() {
            return Err(Error::validation("user id must not be empty"));
        }
        if name.is_empty() {
            return Err(Error::validation("user name must not be empty"));
        }
        if !EMAIL_PATTERN.is_match(&email) {
            return Err(Error::validation(format!("invalid email: {email}")));
        }
        Ok(Self { id, name, email })
    }

    /// The user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validated email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns a copy with a new display name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `name` is empty.
    pub fn with_name(&self, name: impl Into<String>) -> Result<Self> {
        Self::create(self.id.clone(), name, self.email.clone())
    }

    /// Returns a copy with a new email address, re-validating the format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `email` is not a well-formed address.
    pub fn with_email(&self, email: impl Into<String>) -> Result<Self> {
        Self::create(self.id.clone(), self.name.clone(), email)
    }
}

/// Persistence seam for users.
///
/// The core hands out `User` values and trusts implementations to return
/// values satisfying the same invariants; it does not care how storage works.
pub trait UserRepository: Send + Sync {
    /// Looks a user up by id.
    fn find_by_id(&self, id: &UserId) -> Option<User>;

    /// Stores (or replaces) a user, returning the stored value.
    fn save(&self, user: User) -> User;

    /// Removes a user by id.
    fn delete(&self, id: &UserId);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;

    #[test]
    fn valid_email_is_accepted() {
        let user = User::create(UserId::new("u-1"), "Lena Dorn", "lena.dorn@example.org").unwrap();
        assert_eq!(user.email(), "lena.dorn@example.org");
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["not-an-email", "a@b", "user@@example.com", "@example.com"] {
            let result = User::create(UserId::new("u-1"), "Lena", email);
            assert!(matches!(result, Err(Error::Validation(_))), "{email}");
        }
    }

    #[test]
    fn with_email_revalidates() {
        let user = User::create(UserId::new("u-1"), "Lena", "lena@example.org").unwrap();
        assert!(user.with_email("broken").is_err());
        let updated = user.with_email("l.dorn@example.org").unwrap();
        assert_eq!(updated.email(), "l.dorn@example.org");
        assert_eq!(updated.id(), user.id());
    }

    #[test]
    fn with_name_keeps_identity() {
        let user = User::create(UserId::new("u-1"), "Lena", "lena@example.org").unwrap();
        let renamed = user.with_name("Lena Dorn").unwrap();
        assert_eq!(renamed.id(), user.id());
        assert_eq!(renamed.name(), "Lena Dorn");
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert!(User::create(UserId::new(""), "Lena", "lena@example.org").is_err());
        assert!(User::create(UserId::new("u-1"), "", "lena@example.org").is_err());
    }
}
