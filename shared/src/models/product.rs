//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pricing::PriceQuote;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    /// Owning farmer (user email)
    pub farmer_email: String,
    pub category: String,
    pub quality: String,
    /// Minimum acceptable sale price (per unit)
    pub masp: f64,
    /// Units in stock
    pub available: u32,
    pub created_at: DateTime<Utc>,
}

/// Create product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCreate {
    pub farmer_email: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub masp: Option<f64>,
    #[serde(default)]
    pub available: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
}

/// Product with a freshly computed price attached (buyer listing)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedProduct {
    #[serde(flatten)]
    pub product: Product,
    pub current_price: f64,
    pub pricing_breakdown: PriceQuote,
}

impl PricedProduct {
    pub fn new(product: Product, quote: PriceQuote) -> Self {
        Self {
            product,
            current_price: quote.final_price,
            pricing_breakdown: quote,
        }
    }
}
