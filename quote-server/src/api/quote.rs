use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{QuoteRecord, QuoteRequest, QuoteResponse, UNKNOWN_PRODUCT};
use shared::pricing::{check_masp, quote_with_rng};
use std::sync::Arc;

/// POST /api/dynamic-price — 计算动态价格并记账
///
/// Uses the same tiered engine as the marketplace; `available` defaults to
/// 0 (scarce tier) when the caller does not send it.
pub async fn dynamic_price(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuoteRequest>,
) -> AppResult<Json<QuoteResponse>> {
    let masp = req.masp.unwrap_or(0.0);
    if masp < 0.0 || check_masp(masp).is_err() {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            "masp must be a non-negative, priceable number",
        ));
    }
    let qty = req.qty.unwrap_or(1);
    let available = req.available.unwrap_or(0);
    let product = req.product.unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());

    let quote = quote_with_rng(masp, available, &mut rand::thread_rng())?;
    let record = QuoteRecord::seal(product, &quote, qty)
        .map_err(|e| AppError::internal(format!("Failed to hash quote: {}", e)))?;
    let order_hash = record.hash.clone();

    tracing::info!(
        product = %record.product,
        masp,
        available,
        final_price = quote.final_price,
        hash = %order_hash,
        "Quote recorded"
    );
    let entries = state.append(record);
    tracing::debug!(entries, "Quote ledger appended");

    Ok(Json(QuoteResponse { quote, order_hash }))
}
