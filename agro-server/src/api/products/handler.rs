//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::Serialize;
use shared::models::{PricedProduct, Product, ProductCreate};
use shared::pricing::{check_masp, quote_with_rng};

use crate::api::Ack;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Serialize)]
pub struct ProductBody {
    product: Product,
}

/// Attach a freshly drawn price to a product
///
/// Every call draws new jitter, so two listings may show different prices.
fn priced(product: Product) -> AppResult<PricedProduct> {
    let quote = quote_with_rng(product.masp, product.available, &mut rand::thread_rng())?;
    Ok(PricedProduct::new(product, quote))
}

fn required_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// POST /api/products - 上架商品
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<ProductCreate>,
) -> AppResult<Json<Ack<ProductBody>>> {
    let (Some(farmer_email), Some(name)) =
        (required_text(req.farmer_email), required_text(req.name))
    else {
        return Err(AppError::required("farmer_email and name are required"));
    };

    let masp = req.masp.unwrap_or(0.0);
    if masp < 0.0 || check_masp(masp).is_err() {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            "masp must be a non-negative, priceable number",
        )
        .with_detail("masp", masp.to_string()));
    }

    let product = state.storage.create_product(|id| Product {
        id,
        name,
        farmer_email,
        category: req.category.unwrap_or_default(),
        quality: req.quality.unwrap_or_default(),
        masp,
        available: req.available.unwrap_or(0),
        created_at: Utc::now(),
    })?;

    tracing::info!(
        product_id = product.id,
        farmer = %product.farmer_email,
        masp = product.masp,
        available = product.available,
        "Product created"
    );

    Ok(Ack::new(ProductBody { product }))
}

/// GET /api/products - 商品列表 (含实时价格)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<PricedProduct>>> {
    let products = state.storage.list_products()?;
    let priced = products
        .into_iter()
        .map(priced)
        .collect::<AppResult<Vec<_>>>()?;
    Ok(Json(priced))
}

/// GET /api/products/{id} - 单个商品 (含实时价格)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<Json<PricedProduct>> {
    let product = state
        .storage
        .get_product(id)?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", id))?;

    Ok(Json(priced(product)?))
}
