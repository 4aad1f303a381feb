use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::Role;
use auth::TokenService;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use identity_service::identity::errors::AuthError;
use identity_service::identity::models::EmailAddress;
use identity_service::identity::models::Identity;
use identity_service::identity::models::IdentityId;
use identity_service::identity::models::NewIdentity;
use identity_service::identity::models::Username;
use identity_service::identity::ports::Clock;
use identity_service::identity::ports::MailDispatcher;
use identity_service::identity::ports::UserStore;
use identity_service::identity::AuthenticationEngine;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-signing-at-least-32-bytes";
pub const RESET_URL: &str = "https://localhost:3000/reset-password";

/// In-memory user store with email uniqueness, standing in for the real
/// persistence collaborator.
#[derive(Default)]
pub struct InMemoryUserStore {
    records: Mutex<HashMap<IdentityId, Identity>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, AuthError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .values()
            .find(|identity| identity.email.as_str() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, AuthError> {
        let records = self.records.lock().unwrap();
        Ok(records.get(id).cloned())
    }

    async fn save(&self, identity: Identity) -> Result<Identity, AuthError> {
        let mut records = self.records.lock().unwrap();

        let duplicate = records.values().any(|existing| {
            existing.email == identity.email && existing.id != identity.id
        });
        if duplicate {
            return Err(AuthError::EmailAlreadyExists(identity.email.to_string()));
        }

        records.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn delete(&self, id: &IdentityId) -> Result<u64, AuthError> {
        let mut records = self.records.lock().unwrap();
        Ok(records.remove(id).map_or(0, |_| 1))
    }
}

/// Captured outbound message.
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail dispatcher that records messages instead of delivering them.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentMail>>,
    fail_next: AtomicBool,
}

impl RecordingMailer {
    pub fn fail_next_send(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MailDispatcher for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> bool {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return false;
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        true
    }
}

/// Manually advanced clock for deterministic expiry.
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Engine wired with in-memory collaborators, analogous to spawning the real
/// application against a scratch database.
pub struct TestHarness {
    pub engine: AuthenticationEngine<InMemoryUserStore, RecordingMailer, TestClock>,
    pub store: Arc<InMemoryUserStore>,
    pub mailer: Arc<RecordingMailer>,
    pub clock: Arc<TestClock>,
}

impl TestHarness {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryUserStore::default());
        let mailer = Arc::new(RecordingMailer::default());
        let clock = Arc::new(TestClock::new());

        let engine = AuthenticationEngine::new(
            Arc::clone(&store),
            Arc::clone(&mailer),
            Arc::clone(&clock),
            PasswordHasher::new(),
            TokenService::new(TEST_SECRET),
            RESET_URL.to_string(),
        );

        Self {
            engine,
            store,
            mailer,
            clock,
        }
    }

    /// Register an identity with the default role.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Identity {
        self.register_with_role(username, email, password, None).await
    }

    pub async fn register_with_role(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Option<Role>,
    ) -> Identity {
        self.engine
            .register(NewIdentity::new(
                Username::new(username.to_string()).expect("Invalid test username"),
                EmailAddress::new(email.to_string()).expect("Invalid test email"),
                password.to_string(),
                role,
            ))
            .await
            .expect("Failed to register test identity")
    }

    /// Read the stored record back, bypassing the engine.
    pub async fn stored(&self, email: &str) -> Identity {
        self.store
            .find_by_email(email)
            .await
            .expect("Store lookup failed")
            .expect("Identity not found in store")
    }
}
