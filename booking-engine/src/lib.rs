//! Booking Engine - 餐厅订座引擎
//!
//! # 架构概述
//!
//! - **预订** (`booking`): availability evaluator, totals, the booking wizard
//! - **存储** (`store`): in-memory reference store with atomic create
//! - **HTTP API** (`api`): REST resources served by the `booking-store` binary
//!
//! # 模块结构
//!
//! ```text
//! booking-engine/src/
//! ├── core/          # 配置、服务器、错误
//! ├── booking/       # 可用性、金额、预订向导
//! ├── store/         # 内存存储、种子数据
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、时钟、时区
//! ```

pub mod api;
pub mod booking;
pub mod core;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use api::{ApiState, build_app};
pub use booking::{
    AvailabilityEvaluator, AvailabilityRequest, AvailabilityResult, BookingDraft, BookingEngine,
    BookingTotals, BookingWizard, ConflictPolicy, DraftEdit, DraftField, WizardError, WizardStep,
};
pub use core::{Config, Server, ServerError};
pub use store::{CatalogSeed, MemoryStore};
pub use utils::{AppError, AppResult, Clock, FixedClock, SystemClock};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 加载 .env 并初始化日志
pub fn setup_environment(config: &Config) {
    if let Some(dir) = &config.log_dir
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        eprintln!("Failed to create log directory {dir}: {e}");
    }
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.is_production()),
        config.log_dir.as_deref(),
    );
}
