pub mod access;
pub mod errors;
pub mod models;
pub mod ports;
pub mod reset;
pub mod service;

pub use access::Operation;
pub use errors::AuthError;
pub use models::AuthResult;
pub use models::Identity;
pub use models::IdentityProjection;
pub use ports::Clock;
pub use ports::MailDispatcher;
pub use ports::SystemClock;
pub use ports::UserStore;
pub use reset::ResetTokenManager;
pub use service::AuthenticationEngine;
