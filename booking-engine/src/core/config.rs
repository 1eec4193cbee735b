use std::time::Duration;

use chrono_tz::Tz;

/// 服务配置 - booking engine and store API settings
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | Store API port |
/// | REQUEST_TIMEOUT_MS | 10000 | Bound on every store call |
/// | BUSINESS_TIMEZONE | UTC | IANA zone for calendar dates and slots |
/// | SEED_FILE | (unset) | JSON catalog seed for the store |
/// | LOG_LEVEL | info | Logger level |
/// | LOG_DIR | (unset) | Rolling file log directory |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 BUSINESS_TIMEZONE=Europe/Madrid SEED_FILE=db.json cargo run --bin booking-store
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Store API port
    pub http_port: u16,
    /// Bound on each store call (毫秒)
    pub request_timeout_ms: u64,
    /// IANA timezone name, e.g. "Europe/Madrid"
    pub business_timezone: String,
    /// Catalog seed (json) loaded by the store binary
    pub seed_file: Option<String>,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10_000),
            business_timezone: std::env::var("BUSINESS_TIMEZONE").unwrap_or_else(|_| "UTC".into()),
            seed_file: std::env::var("SEED_FILE").ok().filter(|s| !s.is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Parsed business timezone, falling back to UTC on an unknown name
    pub fn timezone(&self) -> Tz {
        self.business_timezone.parse::<Tz>().unwrap_or_else(|e| {
            tracing::warn!(
                "Failed to parse BUSINESS_TIMEZONE '{}': {}, falling back to UTC",
                self.business_timezone,
                e
            );
            Tz::UTC
        })
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_tz(tz: &str) -> Config {
        Config {
            http_port: 0,
            request_timeout_ms: 250,
            business_timezone: tz.into(),
            seed_file: None,
            log_level: "debug".into(),
            log_dir: None,
            environment: "test".into(),
        }
    }

    #[test]
    fn test_timezone_parses_iana_name() {
        assert_eq!(config_with_tz("Europe/Madrid").timezone(), chrono_tz::Europe::Madrid);
    }

    #[test]
    fn test_timezone_falls_back_to_utc() {
        assert_eq!(config_with_tz("Mars/Olympus").timezone(), Tz::UTC);
    }

    #[test]
    fn test_request_timeout() {
        assert_eq!(config_with_tz("UTC").request_timeout(), Duration::from_millis(250));
    }
}
