use crate::auth::JwtConfig;
use crate::core::ServerError;
use std::path::PathBuf;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | WORK_DIR | ./data | Database, uploads and logs live here |
/// | HTTP_PORT | 8000 | |
/// | DATABASE_PATH | {WORK_DIR}/marketplace.db | |
/// | UPLOAD_DIR | {WORK_DIR}/uploads | |
/// | PUBLIC_BASE_URL | http://localhost:{HTTP_PORT} | Prefix for uploaded file URLs |
/// | ENVIRONMENT | development | development, staging or production |
/// | REQUEST_TIMEOUT_MS | 30000 | |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | |
/// | MAX_UPLOAD_BYTES | 5242880 | |
/// | LOG_LEVEL | info | Used when RUST_LOG is unset |
/// | LOG_DIR | (unset) | Enables daily rolling log files |
/// | JWT_SECRET | (generated outside production) | At least 32 characters |
///
/// ```ignore
/// WORK_DIR=/srv/marketplace HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    pub database_path: String,
    pub upload_dir: String,
    pub public_base_url: String,
    pub jwt: JwtConfig,
    pub environment: String,
    pub request_timeout_ms: u64,
    pub shutdown_timeout_ms: u64,
    pub max_upload_bytes: usize,
    pub log_level: String,
    pub log_dir: Option<String>,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Result<Self, ServerError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let http_port = env_or("HTTP_PORT", 8000u16);
        let jwt = JwtConfig::from_env(environment == "production")
            .map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| format!("{work_dir}/marketplace.db")),
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| format!("{work_dir}/uploads")),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{http_port}")),
            work_dir,
            http_port,
            jwt,
            environment,
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", 30_000),
            shutdown_timeout_ms: env_or("SHUTDOWN_TIMEOUT_MS", 10_000),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 5 * 1024 * 1024),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        })
    }

    /// Configuration rooted at `work_dir`, independent of the environment
    ///
    /// Used by tests.
    pub fn for_work_dir(work_dir: impl Into<String>, jwt: JwtConfig) -> Self {
        let work_dir = work_dir.into();
        Self {
            database_path: format!("{work_dir}/marketplace.db"),
            upload_dir: format!("{work_dir}/uploads"),
            public_base_url: "http://localhost:8000".into(),
            work_dir,
            http_port: 8000,
            jwt,
            environment: "development".into(),
            request_timeout_ms: 30_000,
            shutdown_timeout_ms: 10_000,
            max_upload_bytes: 5 * 1024 * 1024,
            log_level: "info".into(),
            log_dir: None,
        }
    }

    /// Create the work, upload and database directories
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        std::fs::create_dir_all(&self.upload_dir)?;
        if let Some(parent) = PathBuf::from(&self.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
