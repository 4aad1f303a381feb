use thiserror::Error;

/// Error for IdentityId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for reset-token consumption.
///
/// `Expired` and `Mismatch` are distinct so internal logs can tell them
/// apart, but they share one user-facing message: callers must not learn
/// whether an outstanding token exists or merely lapsed.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ResetError {
    #[error("Invalid or expired reset token")]
    Expired,

    #[error("Invalid or expired reset token")]
    Mismatch,
}

/// Top-level error for all authentication operations.
///
/// Collaborator failures are translated into this taxonomy at the engine
/// boundary; storage and transport details never leak past it.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid identity ID: {0}")]
    InvalidIdentityId(#[from] IdentityIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::TokenError),

    // Credential failures deliberately share one message: the caller never
    // learns whether the email exists or the password was wrong.
    #[error("Please check your login credentials")]
    InvalidCredentials,

    // No role enumeration in the message
    #[error("Not permitted")]
    Unauthorized,

    #[error("Identity not found: {0}")]
    NotFound(String),

    #[error("Email already in use")]
    EmailAlreadyExists(String),

    #[error("Please check your password")]
    IncorrectPassword,

    #[error("The new password is the same as the old password")]
    PasswordUnchanged,

    #[error("{0}")]
    Reset(#[from] ResetError),

    #[error("Email not sent")]
    DispatchFailed,

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Storage(err.to_string())
    }
}
