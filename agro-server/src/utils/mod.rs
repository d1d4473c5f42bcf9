//! 工具模块 - 通用工具函数和类型
//!
//! - [`AppError`] / [`ErrorCode`] - 统一错误结构 (from shared::error)
//! - [`logger`] - 日志初始化

pub mod logger;

pub use shared::error::{AppError, AppResult, ErrorCode};
