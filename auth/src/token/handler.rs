use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use crate::role::Role;

/// Default token lifetime: 5 days from issuance.
pub const DEFAULT_VALIDITY_DAYS: i64 = 5;

/// Stateless bearer-token service.
///
/// Signs and verifies tokens with a server-held secret (HS256). The server
/// keeps no per-token record, so the only invalidation paths are expiry and
/// rotating the signing secret, which invalidates every outstanding token at
/// once.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validity: Duration,
}

impl TokenService {
    /// Create a token service with the default 5-day validity.
    ///
    /// # Arguments
    /// * `secret` - Signing secret (at least 256 bits for HS256; loaded from
    ///   configuration at startup, never hard-coded)
    pub fn new(secret: &[u8]) -> Self {
        Self::with_validity(secret, Duration::days(DEFAULT_VALIDITY_DAYS))
    }

    /// Create a token service with an explicit validity window.
    pub fn with_validity(secret: &[u8], validity: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            validity,
        }
    }

    /// Issue a signed token for an identity.
    ///
    /// # Arguments
    /// * `email` - Identity lookup email
    /// * `role` - Identity role
    /// * `issued_at` - Issuance instant from the caller's clock
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        email: &str,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        self.issue_claims(&Claims::new(email, role, issued_at, self.validity))
    }

    /// Sign an explicit claims payload.
    pub fn issue_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a presented token and return its claims.
    ///
    /// Signature and algorithm are checked before any claim is inspected, so a
    /// token signed with a different secret or algorithm is rejected outright
    /// rather than downgraded.
    ///
    /// # Errors
    /// * `Expired` - Token expiry has passed
    /// * `Invalid` - Signature mismatch, wrong algorithm, or malformed token
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(self.algorithm);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
