use std::fmt;

use crate::domain::authentication::errors::ValidationError;

/// Registered account.
///
/// `password_hash` is always the output of the password hasher, never the
/// plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Email address value type
///
/// Ensures the address is 5-32 characters long. The email is the account key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MIN_LENGTH: usize = 5;
    const MAX_LENGTH: usize = 32;

    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `ValidationError::Email` - Length outside 5..=32 characters
    pub fn new(email: String) -> Result<Self, ValidationError> {
        let length = email.chars().count();
        if (Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            Ok(Self(email))
        } else {
            Err(ValidationError::Email {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual: length,
            })
        }
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password value type
///
/// Ensures the password is 3-32 characters long. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new validated password.
    ///
    /// # Errors
    /// * `ValidationError::Password` - Length outside 3..=32 characters
    pub fn new(password: String) -> Result<Self, ValidationError> {
        let length = password.chars().count();
        if (Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            Ok(Self(password))
        } else {
            Err(ValidationError::Password {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual: length,
            })
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Raw email/password pair as submitted by a client.
///
/// Validation happens inside the service so every entry point applies the
/// same rules.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Signed bearer token returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_length_bounds() {
        for length in [0, 1, 4, 33, 40] {
            let email = "e".repeat(length);
            assert!(
                matches!(EmailAddress::new(email), Err(ValidationError::Email { .. })),
                "length {} should be rejected",
                length
            );
        }

        for length in [5, 6, 20, 31, 32] {
            let email = "e".repeat(length);
            assert!(EmailAddress::new(email).is_ok(), "length {} should pass", length);
        }
    }

    #[test]
    fn test_password_length_bounds() {
        for length in [0, 1, 2, 33, 64] {
            let password = "p".repeat(length);
            assert!(
                matches!(Password::new(password), Err(ValidationError::Password { .. })),
                "length {} should be rejected",
                length
            );
        }

        for length in [3, 4, 16, 32] {
            let password = "p".repeat(length);
            assert!(Password::new(password).is_ok(), "length {} should pass", length);
        }
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 5 characters, 10 bytes
        assert!(EmailAddress::new("ééééé".to_string()).is_ok());
        // 32 characters, 64 bytes
        assert!(Password::new("ü".repeat(32)).is_ok());
    }

    #[test]
    fn test_validation_error_names_field() {
        let email_err = EmailAddress::new("a@b".to_string()).unwrap_err();
        assert_eq!(email_err.field(), "email");
        assert_eq!(
            email_err.to_string(),
            "email must be between 5 and 32 characters"
        );

        let password_err = Password::new("pw".to_string()).unwrap_err();
        assert_eq!(password_err.field(), "password");
    }

    #[test]
    fn test_debug_redacts_password() {
        let credentials = Credentials::new("alice@example.com", "hunter22");
        let rendered = format!("{:?}", credentials);
        assert!(!rendered.contains("hunter22"));

        let password = Password::new("hunter22".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("hunter22"));
    }
}
