use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use crate::identity::errors::ResetError;
use crate::identity::models::Identity;
use crate::identity::models::PasswordReset;
use crate::identity::ports::Clock;

/// Reset tokens are valid for 15 minutes from issuance.
pub const RESET_TOKEN_VALIDITY_MINUTES: i64 = 15;

/// Issues and consumes single-use password-recovery tokens.
///
/// Tokens are random UUIDs, so collisions are negligible and the token value
/// carries no information. The manager mutates the identity in memory; the
/// caller persists the identity with a single `save`, which keeps the token
/// pair and any password change atomic.
pub struct ResetTokenManager<C: Clock> {
    clock: Arc<C>,
}

impl<C: Clock> ResetTokenManager<C> {
    pub fn new(clock: Arc<C>) -> Self {
        Self { clock }
    }

    /// Issue a fresh recovery token on the identity.
    ///
    /// Overwrites any outstanding token: at most one live reset token exists
    /// per identity, and issuing a new one silently invalidates the old.
    ///
    /// # Returns
    /// The token/expiry pair now set on the identity
    pub fn issue(&self, identity: &mut Identity) -> PasswordReset {
        let reset = PasswordReset {
            token: Uuid::new_v4().to_string(),
            expires_at: self.clock.now() + Duration::minutes(RESET_TOKEN_VALIDITY_MINUTES),
        };
        identity.reset = Some(reset.clone());
        reset
    }

    /// Consume an outstanding token, clearing it from the identity.
    ///
    /// Valid only if the presented token equals the stored one and the expiry
    /// has not passed. On success the reset fields are cleared, so the same
    /// token can never be consumed twice. A missing stored token is reported
    /// as a mismatch.
    ///
    /// # Errors
    /// * `Mismatch` - Presented token differs from the stored one, or none is outstanding
    /// * `Expired` - Token matches but its expiry has passed
    pub fn consume(&self, identity: &mut Identity, presented: &str) -> Result<(), ResetError> {
        let Some(reset) = identity.reset.as_ref() else {
            return Err(ResetError::Mismatch);
        };

        if reset.token != presented {
            return Err(ResetError::Mismatch);
        }

        if self.clock.now() > reset.expires_at {
            return Err(ResetError::Expired);
        }

        identity.reset = None;
        Ok(())
    }
}
