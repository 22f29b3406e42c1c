use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::authentication::errors::RepositoryError;
use crate::domain::authentication::models::EmailAddress;
use crate::domain::authentication::models::User;
use crate::domain::authentication::ports::UserRepository;

/// Credential store kept in process memory.
///
/// Maps email to password hash behind a reader-writer lock: lookups share
/// the lock, inserts take it exclusively. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, String>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_email(&self, email: &EmailAddress) -> Result<User, RepositoryError> {
        let users = self.users.read().await;

        users
            .get(email.as_str())
            .map(|password_hash| User {
                email: email.clone(),
                password_hash: password_hash.clone(),
            })
            .ok_or_else(|| RepositoryError::NotFound(email.to_string()))
    }

    async fn insert(&self, user: User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;

        match users.entry(user.email.as_str().to_string()) {
            Entry::Occupied(_) => Err(RepositoryError::AlreadyExists(user.email.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(user.password_hash);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn user(email: &str, hash: &str) -> User {
        User {
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: hash.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repository = InMemoryUserRepository::new();

        repository
            .insert(user("alice@example.com", "$argon2id$hash"))
            .await
            .expect("Failed to insert user");

        let found = repository
            .get_by_email(&EmailAddress::new("alice@example.com".to_string()).unwrap())
            .await
            .expect("User should exist");

        assert_eq!(found.email.as_str(), "alice@example.com");
        assert_eq!(found.password_hash, "$argon2id$hash");
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let repository = InMemoryUserRepository::new();

        let result = repository
            .get_by_email(&EmailAddress::new("nobody@x.com".to_string()).unwrap())
            .await;

        assert_eq!(
            result.unwrap_err(),
            RepositoryError::NotFound("nobody@x.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_insert_never_overwrites() {
        let repository = InMemoryUserRepository::new();

        repository
            .insert(user("alice@example.com", "$argon2id$first"))
            .await
            .unwrap();

        let result = repository
            .insert(user("alice@example.com", "$argon2id$second"))
            .await;
        assert!(matches!(result, Err(RepositoryError::AlreadyExists(_))));

        let found = repository
            .get_by_email(&EmailAddress::new("alice@example.com".to_string()).unwrap())
            .await
            .unwrap();
        assert_eq!(found.password_hash, "$argon2id$first");
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_same_email() {
        let repository = Arc::new(InMemoryUserRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repository = Arc::clone(&repository);
                tokio::spawn(async move {
                    repository
                        .insert(user("race@example.com", &format!("$argon2id${}", i)))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_distinct_inserts() {
        let repository = Arc::new(InMemoryUserRepository::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let repository = Arc::clone(&repository);
                tokio::spawn(async move {
                    repository
                        .insert(user(&format!("user{}@example.com", i), "$argon2id$hash"))
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().expect("Distinct emails must all insert");
        }

        assert_eq!(repository.len().await, 32);
        assert!(!repository.is_empty().await);
    }
}
