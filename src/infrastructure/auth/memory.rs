//! In-memory AuthService implementation.
//!
//! Holds users and sessions in process memory and compares passwords
//! verbatim. A production backend would hash credentials and persist both
//! maps; it would sit behind the same trait, so the core is unaffected.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{AuthError, AuthService, AuthSession, User, UserId};

struct UserRecord {
    user: User,
    password: String,
}

struct AuthInner {
    /// username -> record
    users: HashMap<String, UserRecord>,
    /// session token -> bound user
    sessions: HashMap<String, User>,
    next_user_id: i64,
}

/// In-memory credential and session store.
pub struct InMemoryAuthService {
    inner: Mutex<AuthInner>,
}

impl InMemoryAuthService {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(AuthInner {
                users: HashMap::new(),
                sessions: HashMap::new(),
                next_user_id: 1,
            }),
        }
    }

    fn issue_session(inner: &mut AuthInner, user: User) -> AuthSession {
        let token = Uuid::new_v4().to_string();
        inner.sessions.insert(token.clone(), user.clone());
        AuthSession { token, user }
    }
}

impl Default for InMemoryAuthService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthService for InMemoryAuthService {
    async fn register_credentials(
        &self,
        username: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<AuthSession, AuthError> {
        let mut inner = self.inner.lock().await;
        if inner.users.contains_key(username) {
            return Err(AuthError::UsernameTaken);
        }
        let user = User::new(
            UserId::new(inner.next_user_id),
            username,
            display_name.unwrap_or_else(|| username.to_string()),
        );
        inner.next_user_id += 1;
        inner.users.insert(
            username.to_string(),
            UserRecord {
                user: user.clone(),
                password: password.to_string(),
            },
        );
        tracing::info!("Registered user '{}'", username);
        Ok(Self::issue_session(&mut inner, user))
    }

    async fn authenticate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let mut inner = self.inner.lock().await;
        // unknown user and wrong password collapse into one error so the
        // response does not leak which usernames exist
        let user = match inner.users.get(username) {
            Some(record) if record.password == password => record.user.clone(),
            _ => return Err(AuthError::InvalidCredentials),
        };
        Ok(Self::issue_session(&mut inner, user))
    }

    async fn resolve_session(&self, token: &str) -> Result<User, AuthError> {
        let inner = self.inner.lock().await;
        inner
            .sessions
            .get(token)
            .cloned()
            .ok_or(AuthError::Unauthenticated)
    }

    async fn revoke_session(&self, token: &str) {
        let mut inner = self.inner.lock().await;
        inner.sessions.remove(token);
    }
}
