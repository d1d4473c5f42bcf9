//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LedgerEntry, Product};
use crate::pricing::{PriceQuote, PricingError, PricingResult};

/// Order ids start above this base (first order is `ORDER_ID_BASE + 1`)
pub const ORDER_ID_BASE: u64 = 1000;

/// Order status
///
/// Orders are never updated after placement, so `Placed` is the only state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Placed,
}

/// Order entity
///
/// Product name and farmer email are denormalized at placement time,
/// unit price is the quote computed inside the placement transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub product_id: u64,
    pub product_name: String,
    pub farmer_email: String,
    pub buyer_name: Option<String>,
    pub buyer_email: Option<String>,
    pub qty: u32,
    pub unit_price: f64,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub pricing_breakdown: PriceQuote,
}

impl Order {
    /// Build a placed order for `product` priced at `pricing`
    ///
    /// Fails when `unit_price * qty` has no exact money value.
    pub fn place(
        id: u64,
        product: &Product,
        buyer: &OrderBuyer,
        qty: u32,
        pricing: PriceQuote,
        created_at: DateTime<Utc>,
    ) -> PricingResult<Self> {
        let unit_price = pricing.final_price;
        let total_price = crate::util::round_money(unit_price * f64::from(qty))
            .ok_or(PricingError::TotalOutOfRange { unit_price, qty })?;

        Ok(Self {
            id,
            product_id: product.id,
            product_name: product.name.clone(),
            farmer_email: product.farmer_email.clone(),
            buyer_name: buyer.name.clone(),
            buyer_email: buyer.email.clone(),
            qty,
            unit_price,
            total_price,
            created_at,
            status: OrderStatus::Placed,
            pricing_breakdown: pricing,
        })
    }
}

/// Buyer identity as given by the client (not checked against users)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBuyer {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Place order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub buyer_name: Option<String>,
    #[serde(default)]
    pub buyer_email: Option<String>,
    pub product_id: Option<u64>,
    /// Defaults to 1
    #[serde(default)]
    pub qty: Option<u32>,
}

/// Result of a successful placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order: Order,
    pub ledger_entry: LedgerEntry,
}

/// Farmer dashboard payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmerOverview {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}
