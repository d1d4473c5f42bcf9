//! Order API Handlers

use axum::{Json, extract::State};
use chrono::Utc;
use shared::models::{OrderBuyer, PlaceOrderRequest, PlacedOrder};
use shared::pricing::{Jitter, quote};

use crate::api::Ack;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};

/// POST /api/orders - 下单
///
/// The unit price is recomputed inside the placement transaction from the
/// product's current stock, so it can differ from the listed price.
pub async fn place(
    State(state): State<ServerState>,
    Json(req): Json<PlaceOrderRequest>,
) -> AppResult<Json<Ack<PlacedOrder>>> {
    let Some(product_id) = req.product_id else {
        return Err(AppError::required("product_id is required"));
    };
    let qty = req.qty.unwrap_or(1);
    if qty == 0 {
        return Err(AppError::new(ErrorCode::OrderInvalidQuantity).with_detail("qty", qty));
    }

    let buyer = OrderBuyer {
        name: req.buyer_name,
        email: req.buyer_email,
    };
    let jitter = Jitter::sample(&mut rand::thread_rng());

    let placed = state
        .storage
        .place_order(
            product_id,
            qty,
            &buyer,
            |product| quote(product.masp, product.available, jitter),
            Utc::now(),
        )
        .inspect_err(|e| {
            tracing::warn!(product_id, qty, error = %e, "Order rejected");
        })?;

    tracing::info!(
        order_id = placed.order.id,
        product_id,
        qty,
        unit_price = placed.order.unit_price,
        total_price = placed.order.total_price,
        "Order placed"
    );
    tracing::info!(
        order_id = placed.ledger_entry.order_id,
        hash = %placed.ledger_entry.hash,
        "Ledger entry appended"
    );

    Ok(Ack::new(placed))
}
