//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 状态、版本、运行时间和数据量 |
//!
//! ```json
//! {
//!   "status": "ok",
//!   "version": "0.1.0",
//!   "uptime_seconds": 42,
//!   "counts": { "users": 2, "products": 3, "orders": 5, "ledger_entries": 5 }
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::storage::StorageStats;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// ok | degraded
    status: &'static str,
    version: &'static str,
    uptime_seconds: u64,
    /// 数据库不可读时为空
    #[serde(skip_serializing_if = "Option::is_none")]
    counts: Option<StorageStats>,
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let counts = state
        .storage
        .stats()
        .inspect_err(|e| tracing::error!(error = %e, "Health check could not read storage"))
        .ok();

    Json(HealthResponse {
        status: if counts.is_some() { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        counts,
    })
}
