//! Authentication Handlers
//!
//! Registration, login (cookie session), logout and session lookup

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
    response::IntoResponse,
};
use chrono::Utc;
use serde::Serialize;
use shared::models::{LoginRequest, LoginResponse, RegisterRequest, User};

use crate::api::Ack;
use crate::auth::{CurrentSession, expired_session_cookie, session_cookie, session_token};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct MessageBody {
    message: &'static str,
}

/// Non-empty trimmed value of an optional field
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// POST /api/register
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<Ack<MessageBody>>> {
    let (Some(email), Some(password)) = (present(req.email), req.password.filter(|p| !p.is_empty()))
    else {
        return Err(AppError::required("Email and password required"));
    };

    let password_hash = User::hash_password(&password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;

    let user = User {
        email,
        name: req.name.unwrap_or_default(),
        password_hash,
        role: req.role.unwrap_or_default(),
        created_at: Utc::now(),
    };

    if let Err(e) = state.storage.create_user(&user) {
        tracing::warn!(email = %user.email, error = %e, "Registration rejected");
        return Err(e.into());
    }

    tracing::info!(email = %user.email, role = %user.role, "User registered");
    Ok(Ack::new(MessageBody {
        message: "User registered",
    }))
}

/// POST /api/login
///
/// Unknown email and wrong password produce the same 401.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(email), Some(password)) = (present(req.email), req.password) else {
        return Err(AppError::required("Email and password required"));
    };

    let user = state.storage.get_user(&email)?;

    let user = match user {
        Some(user) => {
            let valid = user.verify_password(&password).unwrap_or_else(|e| {
                tracing::error!(email = %email, error = %e, "Stored password hash is malformed");
                false
            });
            if !valid {
                tracing::warn!(email = %email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            user
        }
        None => {
            tracing::warn!(email = %email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state.sessions.create(CurrentSession::from(user.info()));

    tracing::info!(email = %user.email, role = %user.role, "User logged in");

    Ok((
        [(SET_COOKIE, session_cookie(&token))],
        Ack::new(LoginResponse {
            role: user.role,
            name: user.name,
        }),
    ))
}

/// POST /api/logout
///
/// Always succeeds; an unknown or missing session is not an error.
pub async fn logout(State(state): State<ServerState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token(&headers)
        && let Some(session) = state.sessions.remove(&token)
    {
        tracing::info!(email = %session.email, "User logged out");
    }

    (
        [(SET_COOKIE, expired_session_cookie())],
        Json(serde_json::json!({ "ok": true })),
    )
}

/// GET /api/session
pub async fn session(session: CurrentSession) -> Json<CurrentSession> {
    Json(session)
}
