use async_trait::async_trait;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::errors::RepositoryError;
use crate::domain::authentication::models::AccessToken;
use crate::domain::authentication::models::Credentials;
use crate::domain::authentication::models::EmailAddress;
use crate::domain::authentication::models::User;

/// Port for authentication domain operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `credentials` - Raw email and password
    ///
    /// # Errors
    /// * `Validation` - Email or password length out of range
    /// * `Conflict` - An account with this email already exists
    /// * `Store` - Storage backend failed
    /// * `Hashing` - Password hashing failed
    async fn register(&self, credentials: Credentials) -> Result<(), AuthError>;

    /// Verify credentials and issue an access token.
    ///
    /// Unknown email and wrong password produce the same error.
    ///
    /// # Arguments
    /// * `credentials` - Raw email and password
    ///
    /// # Returns
    /// Signed access token carrying the email claim
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Store` - Storage backend failed
    /// * `Hashing` - Stored hash could not be checked
    /// * `Token` - Token signing failed
    async fn authenticate(&self, credentials: Credentials) -> Result<AccessToken, AuthError>;
}

/// Credential store keyed by email.
///
/// Implementations must allow concurrent readers and serialize writers.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `Backend` - Storage operation failed
    async fn get_by_email(&self, email: &EmailAddress) -> Result<User, RepositoryError>;

    /// Persist a new user.
    ///
    /// Never replaces an existing entry.
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `Backend` - Storage operation failed
    async fn insert(&self, user: User) -> Result<(), RepositoryError>;
}
