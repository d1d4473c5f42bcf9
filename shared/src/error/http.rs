//! HTTP status for each error code

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Status sent with this code
    ///
    /// Registration conflicts and stock shortages stay plain 400s, which is
    /// what the browser frontend branches on.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::ProductNotFound => StatusCode::NOT_FOUND,

            Self::NotAuthenticated | Self::InvalidCredentials | Self::SessionExpired => {
                StatusCode::UNAUTHORIZED
            }

            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            Self::RequiredField
            | Self::UserAlreadyExists
            | Self::OrderInvalidQuantity
            | Self::ProductInvalidPrice
            | Self::InsufficientStock => StatusCode::BAD_REQUEST,
        }
    }
}
