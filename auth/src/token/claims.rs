use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::role::Role;

/// Bearer-token payload.
///
/// Carries exactly what is needed to re-resolve an identity and make an
/// authorization decision: the lookup email and the role. Never any secret
/// material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Lookup key for re-resolving the identity
    pub email: String,

    /// Role claimed at issuance time
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for an identity with expiry relative to issuance.
    ///
    /// # Arguments
    /// * `email` - Identity lookup email
    /// * `role` - Identity role
    /// * `issued_at` - Issuance instant (caller-supplied clock)
    /// * `validity` - How long the token remains valid
    pub fn new(
        email: impl Into<String>,
        role: Role,
        issued_at: DateTime<Utc>,
        validity: Duration,
    ) -> Self {
        Self {
            email: email.into(),
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + validity).timestamp(),
        }
    }
}
