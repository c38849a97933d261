use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::services::storage::{LocalObjectStorage, ObjectStorage};

/// Shared server state, cloned into every handler
///
/// Holds the database pool, token service and file storage capability.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub storage: Arc<dyn ObjectStorage>,
}

impl ServerState {
    pub fn new(
        config: Config,
        pool: SqlitePool,
        jwt_service: Arc<JwtService>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            config,
            pool,
            jwt_service,
            storage,
        }
    }

    /// Create directories, open the database and wire services
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db = DbService::new(&config.database_path).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let storage: Arc<dyn ObjectStorage> = Arc::new(
            LocalObjectStorage::new(
                &config.upload_dir,
                format!("{}/uploads", config.public_base_url.trim_end_matches('/')),
            )
            .with_max_size(config.max_upload_bytes),
        );

        tracing::info!(
            database = %config.database_path,
            uploads = %config.upload_dir,
            "Server state initialized"
        );

        Ok(Self::new(config.clone(), db.pool, jwt_service, storage))
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
