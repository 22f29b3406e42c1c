//! Authentication primitives
//!
//! Provides the HTTP-free building blocks of the login flow:
//! - Password hashing (Argon2id, cost fixed at construction)
//! - JWT token generation and validation (HMAC algorithms)
//! - Authentication coordination
//!
//! Everything here is synchronous. Callers running on an async runtime are
//! expected to move hashing onto a blocking thread.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_params(1024, 1, 1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{JwtHandler, Claims};
//!
//! let handler = JwtHandler::with_algorithm(b"secret_key_at_least_32_bytes_long!", "HS256").unwrap();
//! let claims = Claims::for_email("alice@example.com", 24).unwrap();
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.email(), Some("alice@example.com"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims, JwtHandler, PasswordHasher};
//!
//! let auth = Authenticator::from_parts(
//!     PasswordHasher::with_params(1024, 1, 1).unwrap(),
//!     JwtHandler::new(b"secret_key_at_least_32_bytes_long!"),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let claims = Claims::for_email("alice@example.com", 24).unwrap();
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Validate token
//! let decoded: Claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.email(), Some("alice@example.com"));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
