use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use tokio::sync::Semaphore;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::errors::RepositoryError;
use crate::domain::authentication::models::AccessToken;
use crate::domain::authentication::models::Credentials;
use crate::domain::authentication::models::EmailAddress;
use crate::domain::authentication::models::Password;
use crate::domain::authentication::models::User;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::authentication::ports::UserRepository;

// Verified against when the email is unknown so both failure paths cost one hash check.
const DUMMY_PASSWORD: &str = "dummy-password-for-timing";

/// Settings fixed at construction time.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Lifetime of issued tokens
    pub token_ttl_hours: i64,
    /// Upper bound on password hash/verify operations running at once
    pub max_concurrent_hashes: usize,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            token_ttl_hours: 24,
            max_concurrent_hashes: 4,
        }
    }
}

/// Domain service implementation for registration and login.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    hashing_permits: Arc<Semaphore>,
    token_ttl_hours: i64,
    dummy_hash: Arc<str>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hasher and token signer
    /// * `config` - Token lifetime and hashing concurrency
    ///
    /// # Errors
    /// * `Token` - Token lifetime is not positive or out of range
    /// * `Hashing` - The configured hasher cannot produce hashes
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        config: AuthServiceConfig,
    ) -> Result<Self, AuthError> {
        auth::jwt::validate_lifetime(config.token_ttl_hours)?;

        let dummy_hash = authenticator.hash_password(DUMMY_PASSWORD)?;

        Ok(Self {
            repository,
            authenticator,
            hashing_permits: Arc::new(Semaphore::new(config.max_concurrent_hashes.max(1))),
            token_ttl_hours: config.token_ttl_hours,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    /// Run a CPU-bound authenticator call on the blocking pool.
    ///
    /// Holds a hashing permit for the duration of the call; no store lock is
    /// held here.
    async fn run_blocking<T, F>(&self, task: F) -> Result<T, AuthError>
    where
        F: FnOnce(&Authenticator) -> T + Send + 'static,
        T: Send + 'static,
    {
        let _permit = self
            .hashing_permits
            .acquire()
            .await
            .map_err(|e| AuthError::Unknown(e.to_string()))?;

        let authenticator = Arc::clone(&self.authenticator);
        Ok(tokio::task::spawn_blocking(move || task(authenticator.as_ref())).await?)
    }

    async fn find_user(&self, email: &EmailAddress) -> Result<Option<User>, AuthError> {
        match self.repository.get_by_email(email).await {
            Ok(user) => Ok(Some(user)),
            Err(RepositoryError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, credentials: Credentials) -> Result<(), AuthError> {
        let email = EmailAddress::new(credentials.email)?;
        let password = Password::new(credentials.password)?;

        if self.find_user(&email).await?.is_some() {
            return Err(AuthError::Conflict);
        }

        let password_hash = self
            .run_blocking(move |authenticator| authenticator.hash_password(password.expose()))
            .await??;

        // A concurrent registration may have won the race since the lookup;
        // the store rejects the second insert and it surfaces as Conflict.
        self.repository
            .insert(User {
                email: email.clone(),
                password_hash,
            })
            .await?;

        tracing::info!(email = %email, "User registered");

        Ok(())
    }

    async fn authenticate(&self, credentials: Credentials) -> Result<AccessToken, AuthError> {
        let password = credentials.password;

        let user = match EmailAddress::new(credentials.email) {
            Ok(email) => self.find_user(&email).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            let dummy_hash = Arc::clone(&self.dummy_hash);
            let _ = self
                .run_blocking(move |authenticator| {
                    authenticator.verify_password(&password, &dummy_hash)
                })
                .await?;
            tracing::debug!("Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let email = user.email.clone();
        let claims = Claims::for_email(email.as_str(), self.token_ttl_hours)?;

        let result = self
            .run_blocking(move |authenticator| {
                authenticator.authenticate(&password, &user.password_hash, &claims)
            })
            .await?;

        match result {
            Ok(result) => {
                tracing::info!(email = %email, "User authenticated");
                Ok(AccessToken::new(result.access_token))
            }
            Err(e) => {
                tracing::debug!(email = %email, "Login rejected");
                Err(e.into())
            }
        }
    }
}
