use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::FarmerOverview;

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/farmer/{email}/products
///
/// Unknown emails get empty lists, not 404.
pub async fn overview(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> AppResult<Json<FarmerOverview>> {
    let products = state.storage.list_products_by_farmer(&email)?;
    let orders = state.storage.list_orders_by_farmer(&email)?;
    Ok(Json(FarmerOverview { products, orders }))
}
