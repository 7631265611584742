//! HTTP API endpoint handlers.
//!
//! Register/login/logout/me cover the session glue at the boundary; the
//! history endpoint replays a room's persisted messages for an
//! authenticated session.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
};

use crate::domain::AuthError;
use crate::infrastructure::dto::http::{
    ErrorResponse, LoginRequest, MeResponse, RegisterRequest, RoomMessagesResponse,
    SessionResponse,
};
use crate::ui::state::AppState;

/// Extract the Bearer token from the Authorization header, if present.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn credential_error(error: AuthError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match error {
        AuthError::Unauthenticated | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::UsernameTaken => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Create a user and issue a session for it.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let session = state
        .auth
        .register_credentials(&request.username, &request.password, request.display_name)
        .await
        .map_err(credential_error)?;
    Ok(Json(SessionResponse {
        token: session.token,
        user: session.user.into(),
    }))
}

/// Validate credentials and issue a session token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let session = state
        .auth
        .authenticate_credentials(&request.username, &request.password)
        .await
        .map_err(credential_error)?;
    Ok(Json(SessionResponse {
        token: session.token,
        user: session.user.into(),
    }))
}

/// Revoke the caller's session.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let token = bearer_token(&headers).ok_or(StatusCode::UNAUTHORIZED)?;
    state
        .auth
        .resolve_session(token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    state.auth.revoke_session(token).await;
    Ok(Json(serde_json::json!({"success": true})))
}

/// Identity bound to the caller's session.
pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, StatusCode> {
    let token = bearer_token(&headers).ok_or(StatusCode::UNAUTHORIZED)?;
    let user = state
        .auth
        .resolve_session(token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    Ok(Json(MeResponse { user: user.into() }))
}

/// Replay a room's messages, oldest first, capped at the history limit.
pub async fn room_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(room): Path<String>,
) -> Result<Json<RoomMessagesResponse>, StatusCode> {
    let token = bearer_token(&headers).ok_or(StatusCode::UNAUTHORIZED)?;
    state
        .auth
        .resolve_session(token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    match state.history_usecase.execute(&room).await {
        Ok(messages) => Ok(Json(RoomMessagesResponse {
            messages: messages.into_iter().map(Into::into).collect(),
        })),
        Err(e) => {
            tracing::error!("Failed to fetch history for room '{}': {}", room, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
