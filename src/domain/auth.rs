//! AuthService capability trait.
//!
//! The core consumes this interface and never looks behind it: password
//! hashing and credential storage belong to the implementation. The
//! infrastructure layer provides an in-memory implementation; a production
//! deployment would back it with a real credential store.

use async_trait::async_trait;

use super::entity::User;
use super::error::AuthError;

/// An issued session: an opaque token bound to a user identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Credential validation and session issuance/resolution.
///
/// The core only ever reads the identity bound to a session; session
/// lifecycle is owned by the implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a new user from credentials and issue a session for it.
    async fn register_credentials(
        &self,
        username: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<AuthSession, AuthError>;

    /// Validate credentials and issue a session token.
    async fn authenticate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError>;

    /// Resolve an opaque session token to the bound user identity.
    async fn resolve_session(&self, token: &str) -> Result<User, AuthError>;

    /// Invalidate a session token. Unknown tokens are a no-op.
    async fn revoke_session(&self, token: &str);
}
