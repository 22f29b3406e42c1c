use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Invalid signing key configuration: {0}")]
    InvalidKey(String),

    #[error("Invalid token lifetime: {0}")]
    InvalidLifetime(String),

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}
