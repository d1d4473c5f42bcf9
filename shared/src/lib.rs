//! Shared types for the SmartAgro marketplace
//!
//! Data model, pricing engine, ledger digest and the error taxonomy used
//! by both `agro-server` and `quote-server`.

pub mod error;
pub mod ledger;
pub mod models;
pub mod pricing;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
