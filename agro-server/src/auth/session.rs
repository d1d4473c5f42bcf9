//! In-memory sessions
//!
//! Sessions live only as long as the process; a restart logs everyone out.

use dashmap::DashMap;
use http::HeaderMap;
use http::header::COOKIE;
use serde::Serialize;
use shared::models::{Role, UserInfo};
use std::sync::Arc;
use uuid::Uuid;

/// Session cookie name
pub const SESSION_COOKIE: &str = "agro_session";

/// 当前会话上下文
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentSession {
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl From<UserInfo> for CurrentSession {
    fn from(info: UserInfo) -> Self {
        Self {
            email: info.email,
            name: info.name,
            role: info.role,
        }
    }
}

/// 会话表: token -> session
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, CurrentSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session and return its token
    pub fn create(&self, session: CurrentSession) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), session);
        token
    }

    pub fn get(&self, token: &str) -> Option<CurrentSession> {
        self.sessions.get(token).map(|s| s.value().clone())
    }

    /// End a session, returning it if it existed
    pub fn remove(&self, token: &str) -> Option<CurrentSession> {
        self.sessions.remove(token).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// `Set-Cookie` value carrying a session token
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax")
}

/// `Set-Cookie` value that makes the browser drop the session cookie
pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}

/// Find the session token in the request's `Cookie` headers
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn session() -> CurrentSession {
        CurrentSession {
            email: "meera@city.in".to_string(),
            name: "Meera".to_string(),
            role: Role::Buyer,
        }
    }

    #[test]
    fn test_create_get_remove() {
        let store = SessionStore::new();
        let token = store.create(session());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&token).unwrap().email, "meera@city.in");

        assert!(store.remove(&token).is_some());
        assert!(store.get(&token).is_none());
        assert!(store.remove(&token).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = SessionStore::new();
        let a = store.create(session());
        let b = store.create(session());
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_session_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);

        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; agro_session=abc-123; lang=hi"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc-123"));

        headers.insert(COOKIE, HeaderValue::from_static("agro_session="));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("t0k");
        assert!(cookie.starts_with("agro_session=t0k;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(expired_session_cookie().ends_with("Max-Age=0"));
    }
}
