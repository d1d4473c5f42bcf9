//! Ledger API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/ledger | GET | 全部账本条目 (追加顺序) |
//! | /api/ledger/verify | GET | 逐条重算哈希并报告被篡改的条目 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/ledger", get(handler::list))
        .route("/api/ledger/verify", get(handler::verify))
}
