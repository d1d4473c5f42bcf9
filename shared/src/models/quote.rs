//! Quote ledger record (quote-server)

use serde::{Deserialize, Serialize};

use crate::ledger::digest;
use crate::pricing::PriceQuote;

/// Name used when a quote request does not say which product it is for
pub const UNKNOWN_PRODUCT: &str = "Unknown";

/// Quote request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub masp: Option<f64>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub qty: Option<u32>,
    #[serde(default)]
    pub available: Option<u32>,
}

/// Quote response: the price breakdown plus the digest of the recorded quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub quote: PriceQuote,
    pub order_hash: String,
}

/// One quote as recorded in the in-memory ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub product: String,
    pub masp: f64,
    pub final_price: f64,
    pub qty: u32,
    pub hash: String,
}

#[derive(Serialize)]
struct QuotePayload<'a> {
    product: &'a str,
    masp: f64,
    final_price: f64,
    qty: u32,
}

impl QuoteRecord {
    /// Build a record and compute its digest
    pub fn seal(
        product: impl Into<String>,
        quote: &PriceQuote,
        qty: u32,
    ) -> serde_json::Result<Self> {
        let product = product.into();
        let hash = digest(&QuotePayload {
            product: &product,
            masp: quote.masp,
            final_price: quote.final_price,
            qty,
        })?;
        Ok(Self {
            product,
            masp: quote.masp,
            final_price: quote.final_price,
            qty,
            hash,
        })
    }

    /// `true` when the stored digest matches the record's content
    pub fn verify(&self) -> bool {
        digest(&QuotePayload {
            product: &self.product,
            masp: self.masp,
            final_price: self.final_price,
            qty: self.qty,
        })
        .map(|h| h == self.hash)
        .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{Jitter, quote};

    #[test]
    fn test_seal_and_verify() {
        let q = quote(25.0, 0, Jitter::Flat).unwrap();
        let record = QuoteRecord::seal("Mango", &q, 4).unwrap();
        assert_eq!(record.final_price, 30.0);
        assert!(record.verify());

        let again = QuoteRecord::seal("Mango", &q, 4).unwrap();
        assert_eq!(record.hash, again.hash);

        let mut edited = record.clone();
        edited.qty = 40;
        assert!(!edited.verify());
    }

    #[test]
    fn test_quote_response_flattens_breakdown() {
        let response = QuoteResponse {
            quote: quote(10.0, 15, Jitter::Flat).unwrap(),
            order_hash: "ab".repeat(32),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["final_price"], 15.0);
        assert_eq!(json["recommendation"], "Buy now - price expected to rise");
        assert_eq!(json["order_hash"].as_str().unwrap().len(), 64);
    }
}
