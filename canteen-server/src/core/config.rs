use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Server configuration
///
/// Every option can be overridden through environment variables:
///
/// | variable | default | meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/canteen | data and log directory |
/// | HTTP_PORT | 5000 | HTTP API port |
/// | REALTIME_TCP_PORT | 5001 | realtime TCP port |
/// | ENVIRONMENT | development | runtime environment |
/// | RETENTION_HOURS | 12 | order retention window |
/// | RETENTION_SWEEP_SECS | 300 | pause between retention sweeps |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Realtime TCP port (client sessions)
    pub realtime_tcp_port: u16,
    /// JWT validation configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Orders older than this many hours are removed
    pub retention_hours: i64,
    /// Seconds between retention sweeps
    pub retention_sweep_secs: u64,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/canteen".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            realtime_tcp_port: std::env::var("REALTIME_TCP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5001),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            retention_hours: std::env::var("RETENTION_HOURS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(12),
            retention_sweep_secs: std::env::var("RETENTION_SWEEP_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(300),
        }
    }

    /// Override the directory and ports (test scenarios)
    pub fn with_overrides(
        work_dir: impl Into<String>,
        http_port: u16,
        realtime_tcp_port: u16,
    ) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.realtime_tcp_port = realtime_tcp_port;
        config
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the work directory layout if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
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
