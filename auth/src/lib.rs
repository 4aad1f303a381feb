//! Authentication primitives library
//!
//! Provides the reusable building blocks of the identity core:
//! - Password hashing (Argon2id, tunable cost)
//! - Bearer-token issuance and validation (JWT, HS256)
//! - Role set and pure role authorization
//!
//! The service crate defines its own ports and orchestration and wires these
//! implementations in explicitly. Keeping them here avoids coupling the
//! primitives to any particular store or transport.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::{Role, TokenService};
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!");
//! let token = tokens
//!     .issue("alice@example.com", Role::User, chrono::Utc::now())
//!     .unwrap();
//! let claims = tokens.verify(&token).unwrap();
//! assert_eq!(claims.email, "alice@example.com");
//! ```
//!
//! ## Role Authorization
//! ```
//! use auth::{role, Role};
//!
//! // No hierarchy: each operation declares its exact permitted set.
//! assert!(role::authorize(Role::SubAdmin, &[Role::SuperAdmin, Role::SubAdmin]));
//! assert!(!role::authorize(Role::SuperAdmin, &[Role::User]));
//! ```

pub mod password;
pub mod role;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use role::Role;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenService;
