use std::sync::Arc;

use auth::PasswordHasher;
use auth::Role;
use auth::TokenService;

use crate::config::Config;
use crate::identity::access::Operation;
use crate::identity::errors::AuthError;
use crate::identity::errors::ResetError;
use crate::identity::models::AuthResult;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::models::IdentityProjection;
use crate::identity::models::NewIdentity;
use crate::identity::ports::Clock;
use crate::identity::ports::MailDispatcher;
use crate::identity::ports::UserStore;
use crate::identity::reset::ResetTokenManager;

/// Orchestrates credential verification, token issuance, and the
/// password-recovery flow.
///
/// Stateless per call: every operation is an independent unit of work against
/// the injected collaborators, with no session state retained in process.
pub struct AuthenticationEngine<US, MD, C>
where
    US: UserStore,
    MD: MailDispatcher,
    C: Clock,
{
    store: Arc<US>,
    mailer: Arc<MD>,
    clock: Arc<C>,
    password_hasher: PasswordHasher,
    tokens: TokenService,
    reset_tokens: ResetTokenManager<C>,
    reset_url: String,
}

impl<US, MD, C> AuthenticationEngine<US, MD, C>
where
    US: UserStore,
    MD: MailDispatcher,
    C: Clock,
{
    /// Create an engine with explicitly wired collaborators.
    ///
    /// # Arguments
    /// * `store` - Identity persistence
    /// * `mailer` - Outbound mail collaborator
    /// * `clock` - Time source for expiry computation
    /// * `password_hasher` - Credential hashing policy
    /// * `tokens` - Bearer-token signing/verification
    /// * `reset_url` - Base URL embedded in recovery links
    pub fn new(
        store: Arc<US>,
        mailer: Arc<MD>,
        clock: Arc<C>,
        password_hasher: PasswordHasher,
        tokens: TokenService,
        reset_url: String,
    ) -> Self {
        let reset_tokens = ResetTokenManager::new(Arc::clone(&clock));
        Self {
            store,
            mailer,
            clock,
            password_hasher,
            tokens,
            reset_tokens,
            reset_url,
        }
    }

    /// Create an engine from loaded configuration.
    ///
    /// The signing secret and hashing cost come from config; rotating the
    /// secret invalidates every outstanding token.
    ///
    /// # Errors
    /// * `Password` - Hasher cost parameters rejected
    pub fn from_config(
        config: &Config,
        store: Arc<US>,
        mailer: Arc<MD>,
        clock: Arc<C>,
    ) -> Result<Self, AuthError> {
        let password_hasher = PasswordHasher::with_params(
            config.hasher.memory_kib,
            config.hasher.iterations,
            config.hasher.parallelism,
        )?;
        let tokens = TokenService::with_validity(
            config.token.secret.as_bytes(),
            chrono::Duration::days(config.token.validity_days),
        );

        Ok(Self::new(
            store,
            mailer,
            clock,
            password_hasher,
            tokens,
            config.mail.reset_url.clone(),
        ))
    }

    /// Register a new identity with a freshly hashed password.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `Storage` - Store operation failed
    pub async fn register(&self, command: NewIdentity) -> Result<Identity, AuthError> {
        if self
            .store
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let identity = Identity {
            id: IdentityId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            role: command.role.unwrap_or(Role::User),
            reset: None,
            created_at: self.clock.now(),
        };

        self.store.save(identity).await
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// Unknown email and wrong password both map to `InvalidCredentials`, so
    /// the caller cannot probe which accounts exist.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Email unknown or password mismatch
    /// * `Token` - Token signing failed
    /// * `Storage` - Store operation failed
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        let identity = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self
            .password_hasher
            .verify(password, &identity.password_hash)
        {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token =
            self.tokens
                .issue(identity.email.as_str(), identity.role, self.clock.now())?;

        Ok(AuthResult {
            access_token,
            identity: IdentityProjection::from(&identity),
        })
    }

    /// Resolve a presented bearer token to a live identity.
    ///
    /// The signature is verified before the claimed email is trusted for the
    /// store lookup. All failures collapse to `Unauthorized` outward; the
    /// cause is only logged.
    ///
    /// # Errors
    /// * `Unauthorized` - Invalid/expired token, or identity no longer exists
    /// * `Storage` - Store operation failed
    pub async fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(reason = %e, "bearer token rejected");
            AuthError::Unauthorized
        })?;

        self.store
            .find_by_email(&claims.email)
            .await?
            .ok_or_else(|| {
                tracing::debug!(email = %claims.email, "token claims an unknown identity");
                AuthError::Unauthorized
            })
    }

    /// Check an identity's role against the operation's required-role set.
    ///
    /// # Errors
    /// * `Unauthorized` - Role not in the operation's permitted set
    pub fn authorize(&self, identity: &Identity, operation: Operation) -> Result<(), AuthError> {
        if auth::role::authorize(identity.role, operation.required_roles()) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }

    /// Start the credential-recovery flow.
    ///
    /// Persists a fresh reset token on the identity, then mails a recovery
    /// link. A failed dispatch reports `DispatchFailed` without rolling back
    /// the persisted token: the state stays retry-sendable rather than forcing
    /// the user to re-request.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Email unknown (same non-disclosure as login)
    /// * `DispatchFailed` - Mail handoff failed; token remains persisted
    /// * `Storage` - Store operation failed
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let mut identity = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let reset = self.reset_tokens.issue(&mut identity);
        let identity = self.store.save(identity).await?;

        let reset_link = format!("{}?token={}", self.reset_url, reset.token);
        let body = format!(
            "Please click on this link to reset your password: {}",
            reset_link
        );

        let sent = self
            .mailer
            .send(identity.email.as_str(), "Password Reset", &body)
            .await;

        if !sent {
            tracing::warn!(
                identity_id = %identity.id,
                "reset mail dispatch failed; token stays valid for retry"
            );
            return Err(AuthError::DispatchFailed);
        }

        Ok(())
    }

    /// Change an authenticated identity's password.
    ///
    /// The no-op check compares the supplied plaintexts before any hashing, so
    /// a rejected change never pays the hashing cost.
    ///
    /// # Errors
    /// * `IncorrectPassword` - Current password does not verify
    /// * `PasswordUnchanged` - New password equals the current one
    /// * `Password` - Hashing failed
    /// * `Storage` - Store operation failed
    pub async fn change_password(
        &self,
        identity: &Identity,
        current: &str,
        new: &str,
    ) -> Result<(), AuthError> {
        if !self
            .password_hasher
            .verify(current, &identity.password_hash)
        {
            return Err(AuthError::IncorrectPassword);
        }

        if current == new {
            return Err(AuthError::PasswordUnchanged);
        }

        let mut updated = identity.clone();
        updated.password_hash = self.password_hasher.hash(new)?;
        self.store.save(updated).await?;

        Ok(())
    }

    /// Complete the recovery flow: consume the reset token and set the new
    /// password in one persisted mutation.
    ///
    /// An unknown email reports the same mismatch as a wrong token; the stored
    /// plaintext is gone, so the no-op check here verifies the new password
    /// against the old hash.
    ///
    /// # Errors
    /// * `Reset(Mismatch)` - Email unknown, no outstanding token, or wrong token
    /// * `Reset(Expired)` - Token matches but has lapsed
    /// * `PasswordUnchanged` - New password equals the old one
    /// * `Password` - Hashing failed
    /// * `Storage` - Store operation failed
    pub async fn complete_reset(
        &self,
        email: &str,
        presented: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let mut identity = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AuthError::Reset(ResetError::Mismatch))?;

        self.reset_tokens
            .consume(&mut identity, presented)
            .map_err(|e| {
                tracing::debug!(identity_id = %identity.id, reason = ?e, "reset token rejected");
                e
            })?;

        if self
            .password_hasher
            .verify(new_password, &identity.password_hash)
        {
            return Err(AuthError::PasswordUnchanged);
        }

        identity.password_hash = self.password_hasher.hash(new_password)?;
        // One save applies the new hash and the cleared token together
        self.store.save(identity).await?;

        Ok(())
    }
}
