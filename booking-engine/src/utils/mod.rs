//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - 日志、时钟、时区工具

pub mod clock;
pub mod logger;
pub mod time;

pub use clock::{Clock, FixedClock, SystemClock};
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
