//! quote-server HTTP 接口
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/dynamic-price | POST | 计算动态价格并写入内存账本 |
//! | /api/ledger | GET | 报价账本 (追加顺序) |
//! | /health | GET | 状态与账本条数 |

mod ledger;
mod quote;

use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router, extract::State};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    let timeout = state.request_timeout;

    Router::new()
        .route("/api/dynamic-price", post(quote::dynamic_price))
        .route("/api/ledger", get(ledger::list))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(TimeoutLayer::with_status_code(
            http::StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_seconds: u64,
    entries: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        entries: state.entries(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::time::Duration;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(Duration::from_secs(5)));
        (router(state.clone()), state)
    }

    async fn call(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn quote_request(body: Value) -> Request<Body> {
        Request::post("/api/dynamic-price")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_quote_is_priced_and_recorded() {
        let (router, state) = app();

        let (status, body) = call(
            &router,
            quote_request(json!({"masp": 10.0, "product": "Tomato", "qty": 3, "available": 15})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let price = body["final_price"].as_f64().unwrap();
        assert!(price == 15.0 || price == 16.0, "{price}");
        assert_eq!(body["platform_fee"], 3.0);
        assert_eq!(body["recommendation"], "Buy now - price expected to rise");
        let hash = body["order_hash"].as_str().unwrap().to_string();
        assert_eq!(hash.len(), 64);

        let ledger = state.snapshot();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].product, "Tomato");
        assert_eq!(ledger[0].qty, 3);
        assert_eq!(ledger[0].final_price, price);
        assert_eq!(ledger[0].hash, hash);
        assert!(ledger[0].verify());
    }

    #[tokio::test]
    async fn test_defaults_apply_to_empty_body() {
        let (router, state) = app();

        let (status, body) = call(&router, quote_request(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        // masp 0, available 0 -> +2 tier, optional +1
        let price = body["final_price"].as_f64().unwrap();
        assert!(price == 5.0 || price == 6.0, "{price}");

        let record = &state.snapshot()[0];
        assert_eq!(record.product, "Unknown");
        assert_eq!(record.qty, 1);
        assert_eq!(record.masp, 0.0);
    }

    #[tokio::test]
    async fn test_unpriceable_masp_is_rejected() {
        let (router, state) = app();
        for masp in [json!(-1), json!(1e29)] {
            let (status, body) = call(&router, quote_request(json!({"masp": masp}))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "masp={masp}");
            assert_eq!(body["code"], 6002);
            assert_eq!(body["ok"], false);
            assert!(body["error"].is_string());
        }
        assert_eq!(state.entries(), 0);
    }

    #[tokio::test]
    async fn test_ledger_and_health() {
        let (router, _) = app();
        for masp in [10.0, 200.0] {
            call(&router, quote_request(json!({"masp": masp, "available": 500}))).await;
        }

        let (status, ledger) = call(
            &router,
            Request::get("/api/ledger").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let ledger = ledger.as_array().unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0]["masp"], 10.0);
        assert_eq!(ledger[1]["masp"], 200.0);

        let (status, health) = call(
            &router,
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health["status"], "ok");
        assert_eq!(health["entries"], 2);
    }
}
