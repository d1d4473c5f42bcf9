//! 会话认证模块
//!
//! 登录后签发随机会话令牌，放在 HttpOnly cookie 中：
//! - [`SessionStore`] - 内存会话表
//! - [`CurrentSession`] - 当前会话上下文 (extractor)

pub mod extractor;
pub mod session;

pub use session::{
    CurrentSession, SESSION_COOKIE, SessionStore, expired_session_cookie, session_cookie,
    session_token,
};
