//! Error handling shared by both HTTP services
//!
//! - [`ErrorCode`]: numeric code sent to clients
//! - [`ErrorCategory`]: code range, decides what gets logged
//! - [`AppError`]: handler error, renders as [`ErrorBody`]
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::required("Missing fields").with_detail("field", "farmer_email");
//! assert_eq!(err.code, ErrorCode::RequiredField);
//! assert_eq!(err.http_status(), shared::http::StatusCode::BAD_REQUEST);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::ErrorCode;
pub use types::{AppError, AppResult, ErrorBody};
