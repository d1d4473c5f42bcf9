//! Session Extractor
//!
//! Resolves the `agro_session` cookie to a [`CurrentSession`]

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::AppError;

use super::session::{CurrentSession, session_token};
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<CurrentSession>() {
            return Ok(session.clone());
        }

        let Some(token) = session_token(&parts.headers) else {
            tracing::debug!(uri = %parts.uri, "No session cookie");
            return Err(AppError::not_authenticated());
        };

        match state.sessions.get(&token) {
            Some(session) => {
                parts.extensions.insert(session.clone());
                Ok(session)
            }
            None => {
                tracing::warn!(uri = %parts.uri, "Unknown or expired session token");
                Err(AppError::new(shared::error::ErrorCode::SessionExpired))
            }
        }
    }
}
