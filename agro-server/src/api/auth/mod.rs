//! Authentication Routes
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/register | POST | 注册 (email 唯一) |
//! | /api/login | POST | 登录，签发会话 cookie |
//! | /api/logout | POST | 登出，清除会话 cookie |
//! | /api/session | GET | 当前会话用户 |

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/register", post(handler::register))
        .route("/api/login", post(handler::login))
        .route("/api/logout", post(handler::logout))
        .route("/api/session", get(handler::session))
}
