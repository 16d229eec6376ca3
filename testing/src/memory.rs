//! In-memory repository implementations.

use reserva_core::types::UserId;
use reserva_core::user::{User, UserRepository};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// A thread-safe, in-memory [`UserRepository`].
///
/// Backs tests and demos; production storage lives behind the same trait
/// elsewhere.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many users are stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_id(&self, id: &UserId) -> Option<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn save(&self, user: User) -> User {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.id().clone(), user.clone());
        user
    }

    fn delete(&self, id: &UserId) {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;

    fn user(id: &str) -> User {
        User::create(UserId::new(id), "Lena Dorn", "lena@example.org").unwrap()
    }

    #[test]
    fn save_find_delete_round_trip() {
        let repository = InMemoryUserRepository::new();
        assert!(repository.is_empty());

        let stored = repository.save(user("u-1"));
        assert_eq!(repository.find_by_id(stored.id()), Some(stored.clone()));
        assert_eq!(repository.len(), 1);

        repository.delete(stored.id());
        assert_eq!(repository.find_by_id(stored.id()), None);
    }

    #[test]
    fn save_replaces_an_existing_user() {
        let repository = InMemoryUserRepository::new();
        let original = repository.save(user("u-1"));
        let renamed = repository.save(original.with_name("Lena D.").unwrap());
        assert_eq!(repository.len(), 1);
        assert_eq!(
            repository.find_by_id(original.id()),
            Some(renamed)
        );
    }
}
