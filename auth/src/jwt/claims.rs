use std::collections::HashMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Claim key carrying the authenticated email address.
pub const EMAIL_CLAIM: &str = "email";

/// JWT claims carried by access tokens.
///
/// Registered time claims are typed; everything else lives in the
/// flattened `extra` map, so a token is a plain string-keyed mapping on
/// the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Not before (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for an authenticated email with automatic expiration.
    ///
    /// # Arguments
    /// * `email` - Authenticated email address (stored under `email`)
    /// * `expiration_hours` - Hours until token expires
    ///
    /// # Returns
    /// Claims with exp, iat, and email set
    ///
    /// # Errors
    /// * `InvalidLifetime` - `expiration_hours` is not positive or overflows
    pub fn for_email(email: impl ToString, expiration_hours: i64) -> Result<Self, JwtError> {
        let now = Utc::now();
        let expiration = expiration_after(now, expiration_hours)?;

        Ok(Self::new()
            .with_expiration(expiration)
            .with_issued_at(now.timestamp())
            .with_extra(EMAIL_CLAIM, email.to_string()))
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set not before (Unix timestamp).
    pub fn with_not_before(mut self, nbf: i64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Get the authenticated email from extra fields.
    pub fn email(&self) -> Option<&str> {
        self.extra.get(EMAIL_CLAIM).and_then(|v| v.as_str())
    }

    /// Get the authenticated email, failing when the claim is absent.
    ///
    /// # Errors
    /// * `MissingClaim` - No string `email` claim in the token
    pub fn require_email(&self) -> Result<&str, JwtError> {
        self.email()
            .ok_or_else(|| JwtError::MissingClaim(EMAIL_CLAIM.to_string()))
    }
}

/// Check that a token lifetime in hours can be issued from now.
///
/// # Errors
/// * `InvalidLifetime` - Lifetime is zero, negative, or out of range
pub fn validate_lifetime(expiration_hours: i64) -> Result<(), JwtError> {
    expiration_after(Utc::now(), expiration_hours).map(|_| ())
}

fn expiration_after(now: DateTime<Utc>, expiration_hours: i64) -> Result<i64, JwtError> {
    if expiration_hours <= 0 {
        return Err(JwtError::InvalidLifetime(format!(
            "{} hours, must be positive",
            expiration_hours
        )));
    }

    Duration::try_hours(expiration_hours)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .map(|expiration| expiration.timestamp())
        .ok_or_else(|| {
            JwtError::InvalidLifetime(format!("{} hours is out of range", expiration_hours))
        })
}

impl Default for Claims {
    fn default() -> Self {
        Self {
            exp: None,
            iat: None,
            nbf: None,
            extra: HashMap::new(),
        }
    }
}
