//! Storage errors

use shared::error::{AppError, ErrorCode};
use shared::pricing::PricingError;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("User already exists: {0}")]
    UserExists(String),

    #[error("Product not found: {0}")]
    ProductNotFound(u64),

    #[error("Not enough stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UserExists(_) => AppError::new(ErrorCode::UserAlreadyExists),
            StorageError::ProductNotFound(id) => {
                AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", id)
            }
            StorageError::InsufficientStock {
                requested,
                available,
            } => AppError::new(ErrorCode::InsufficientStock)
                .with_detail("requested", requested)
                .with_detail("available", available),
            StorageError::Pricing(e) => e.into(),
            StorageError::Serialization(e) => AppError::internal(e.to_string()),
            other => AppError::database(other.to_string()),
        }
    }
}
