//! Object Storage
//!
//! Upload capability used by the `/api/v1/upload` endpoint. The local
//! implementation writes under the configured upload directory and returns a
//! public URL built from `PUBLIC_BASE_URL`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Accepted file extensions
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "pdf"];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Empty file provided")]
    Empty,

    #[error("File too large ({size} bytes, max {max} bytes)")]
    TooLarge { size: usize, max: usize },

    #[error("Unsupported file extension '{0}'")]
    UnsupportedExtension(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Store bytes under a name and get back a retrievable URL
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(&self, name: &str, bytes: &[u8]) -> Result<String, StorageError>;
}

/// Filesystem-backed storage
#[derive(Debug, Clone)]
pub struct LocalObjectStorage {
    root: PathBuf,
    base_url: String,
    max_size: usize,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_size: MAX_FILE_SIZE,
        }
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Lower-cased extension of `name`, if it is on the allowlist
pub fn validated_extension(name: &str) -> Result<String, StorageError> {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(StorageError::UnsupportedExtension(ext))
    }
}

/// Whether `name` is a bare file name that cannot escape the upload root
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty() && !name.contains("..") && !name.contains('/') && !name.contains('\\')
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn upload(&self, name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        if bytes.is_empty() {
            return Err(StorageError::Empty);
        }
        if bytes.len() > self.max_size {
            return Err(StorageError::TooLarge {
                size: bytes.len(),
                max: self.max_size,
            });
        }
        let ext = validated_extension(name)?;

        tokio::fs::create_dir_all(&self.root).await?;
        let file_name = format!("{}.{}", Uuid::new_v4(), ext);
        tokio::fs::write(self.root.join(&file_name), bytes).await?;

        tracing::info!(original = %name, stored = %file_name, size = bytes.len(), "File stored");
        Ok(format!("{}/{}", self.base_url, file_name))
    }
}
