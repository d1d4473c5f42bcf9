//! Ledger Model
//!
//! One entry per placed order. `hash` is the digest of the entry's other
//! fields (see [`crate::ledger`]); there is no link to the previous entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Order;
use crate::ledger::digest;

/// Ledger entry (immutable once sealed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub order_id: u64,
    pub order: Order,
    pub timestamp: DateTime<Utc>,
    /// SHA-256 (hex) over `{order_id, order, timestamp}`
    pub hash: String,
}

/// Hashed part of a ledger entry
#[derive(Serialize)]
struct LedgerPayload<'a> {
    order_id: u64,
    order: &'a Order,
    timestamp: &'a DateTime<Utc>,
}

impl LedgerEntry {
    /// Build an entry for `order` and compute its digest
    pub fn seal(order: Order, timestamp: DateTime<Utc>) -> serde_json::Result<Self> {
        let hash = digest(&LedgerPayload {
            order_id: order.id,
            order: &order,
            timestamp: &timestamp,
        })?;
        Ok(Self {
            order_id: order.id,
            order,
            timestamp,
            hash,
        })
    }

    /// Recompute the digest from the current field values
    pub fn compute_hash(&self) -> serde_json::Result<String> {
        digest(&LedgerPayload {
            order_id: self.order_id,
            order: &self.order,
            timestamp: &self.timestamp,
        })
    }

    /// `true` when the stored digest matches the entry's content
    pub fn verify(&self) -> bool {
        self.compute_hash()
            .map(|h| h == self.hash)
            .unwrap_or(false)
    }
}

/// Ledger verification result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerVerification {
    /// Number of entries checked
    pub total_entries: u64,
    /// Entries whose digest still matches
    pub intact_entries: u64,
    /// Order ids of entries whose digest no longer matches
    pub tampered: Vec<u64>,
    pub ledger_intact: bool,
}

/// Check every entry's digest independently
pub fn verify_entries(entries: &[LedgerEntry]) -> LedgerVerification {
    let tampered: Vec<u64> = entries
        .iter()
        .filter(|e| !e.verify())
        .map(|e| e.order_id)
        .collect();

    let total_entries = entries.len() as u64;
    LedgerVerification {
        total_entries,
        intact_entries: total_entries - tampered.len() as u64,
        ledger_intact: tampered.is_empty(),
        tampered,
    }
}
