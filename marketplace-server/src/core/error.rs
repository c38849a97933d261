use shared::AppError;
use thiserror::Error;

/// Startup and serve-loop failures
///
/// Request-level failures use [`AppError`]; this type covers what can stop
/// the process.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Init(#[from] AppError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
