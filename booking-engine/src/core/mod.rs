//! 核心模块 - 服务器配置、错误定义
//!
//! # 模块结构
//!
//! - [`Config`] - 服务配置
//! - [`Server`] - HTTP 服务器
//! - [`ServerError`] - 服务器错误

pub mod config;
pub mod error;
pub mod server;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::{Server, serve};
