//! Farmer dashboard API
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/farmer/{email}/products | GET | 农户的商品和收到的订单 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/farmer/{email}/products", get(handler::overview))
}
