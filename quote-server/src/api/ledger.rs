use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use shared::models::QuoteRecord;
use std::sync::Arc;

/// GET /api/ledger
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<QuoteRecord>> {
    Json(state.snapshot())
}
