use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::identity::errors::AuthError;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;

/// Persistence operations the core needs from the outside world.
///
/// Implementations own email uniqueness and must persist the reset-token pair
/// atomically with the rest of the record (single-row update); concurrent
/// reset issuance races to last-write-wins.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Retrieve identity by email lookup key.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, AuthError>;

    /// Retrieve identity by identifier.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, AuthError>;

    /// Persist an identity, inserting or replacing by id.
    ///
    /// # Returns
    /// The persisted identity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email uniqueness violated
    /// * `Storage` - Store operation failed
    async fn save(&self, identity: Identity) -> Result<Identity, AuthError>;

    /// Remove an identity.
    ///
    /// # Returns
    /// Number of affected records (0 if the id did not exist)
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn delete(&self, id: &IdentityId) -> Result<u64, AuthError>;
}

/// Outbound mail collaborator.
///
/// Transport configuration and delivery are out of scope; the core only needs
/// a success signal. A `false` return is reportable, never fatal.
#[async_trait]
pub trait MailDispatcher: Send + Sync + 'static {
    /// Send a message.
    ///
    /// # Returns
    /// True if the message was handed off for delivery
    async fn send(&self, to: &str, subject: &str, body: &str) -> bool;
}

/// Time source for expiry computation.
///
/// Injectable so expiry behavior is deterministic under test.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
