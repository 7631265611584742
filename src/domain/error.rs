//! Error taxonomies for the capability boundaries.

use thiserror::Error;

/// Authentication and session errors.
///
/// `Unauthenticated` is fatal for the connection that raised it and is
/// enforced before any other core logic runs; credential errors are
/// recoverable and surfaced to the caller as a short reason string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("no valid session for token")]
    Unauthenticated,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("username already exists")]
    UsernameTaken,
}

/// Message store errors.
///
/// Persistence failures are contained within the operation that raised
/// them: the event is logged and dropped, unrelated connections are never
/// affected (fire-and-forget).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("message store unavailable: {0}")]
    Unavailable(String),
}
