use crate::config::AppConfig;
use crate::file_config::FileConfig;
use sqlx::PgPool;
use std::sync::Arc;

/// Central dependency container handed to the GraphQL schema and router.
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub config: AppConfig,
    pub file_config: Arc<FileConfig>,
}

impl ServerDeps {
    pub fn new(db_pool: PgPool, config: AppConfig, file_config: Arc<FileConfig>) -> Self {
        Self {
            db_pool,
            config,
            file_config,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.db_pool
    }

    /// Clamp a caller-supplied limit to the configured maximum.
    pub fn clamp_limit(&self, limit: i64) -> i64 {
        limit.min(self.file_config.query.max_limit)
    }
}
