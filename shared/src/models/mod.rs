//! Data models
//!
//! Shared between agro-server, quote-server and the frontend (via API).
//! Product and order ids are `u64` counters allocated by the store.

pub mod ledger;
pub mod order;
pub mod product;
pub mod quote;
pub mod user;

// Re-exports
pub use ledger::*;
pub use order::*;
pub use product::*;
pub use quote::*;
pub use user::*;
