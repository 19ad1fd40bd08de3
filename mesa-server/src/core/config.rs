/// Server configuration
///
/// # 环境变量
///
/// All settings can be overridden through environment variables:
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/mesa | 工作目录 (database, logs) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (stdout) | 日志文件目录 |
/// | FEED_CAPACITY | 1024 | 订单广播通道容量 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/mesa HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the embedded database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Log level filter
    pub log_level: String,
    /// Optional directory for rolling log files (stdout when unset)
    pub log_dir: Option<String>,
    /// Capacity of the order feed broadcast channel
    pub feed_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Falls back to defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/mesa".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            feed_capacity: std::env::var("FEED_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1024),
        }
    }

    /// Override selected settings (用于测试场景)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Database path inside the working directory
    pub fn database_path(&self) -> std::path::PathBuf {
        std::path::PathBuf::from(&self.work_dir).join("mesa.db")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
