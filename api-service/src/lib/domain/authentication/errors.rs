use thiserror::Error;

/// Input validation failures, each naming the offending field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email must be between {min} and {max} characters")]
    Email { min: usize, max: usize, actual: usize },

    #[error("password must be between {min} and {max} characters")]
    Password { min: usize, max: usize, actual: usize },

    #[error("malformed request body: {0}")]
    Body(String),
}

impl ValidationError {
    /// Name of the input that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Email { .. } => "email",
            ValidationError::Password { .. } => "password",
            ValidationError::Body(_) => "body",
        }
    }
}

/// Credential store failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("Storage backend failure: {0}")]
    Backend(String),
}

/// Top-level error for registration and login.
///
/// Storage, hashing and token failures keep their detail for logging; the
/// HTTP layer never forwards it to the caller.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("user already exists")]
    Conflict,

    #[error("invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Storage failure: {0}")]
    Store(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token issuance failed: {0}")]
    Token(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<RepositoryError> for AuthError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists(_) => AuthError::Conflict,
            RepositoryError::NotFound(_) => AuthError::InvalidCredentials,
            RepositoryError::Backend(msg) => AuthError::Store(msg),
        }
    }
}

impl From<auth::PasswordError> for AuthError {
    fn from(err: auth::PasswordError) -> Self {
        AuthError::Hashing(err.to_string())
    }
}

impl From<auth::JwtError> for AuthError {
    fn from(err: auth::JwtError) -> Self {
        AuthError::Token(err.to_string())
    }
}

impl From<auth::AuthenticationError> for AuthError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            auth::AuthenticationError::PasswordError(e) => AuthError::Hashing(e.to_string()),
            auth::AuthenticationError::JwtError(e) => AuthError::Token(e.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Unknown(format!("blocking task failed: {}", err))
    }
}
