use std::sync::Arc;

use anyhow::Context;
use registrar_config::{
    CorsConfig, JwtConfig, PaginationConfig, RegistrationConfig, ServerConfig, StorageBackend,
};
use registrar_db::memory::{MemoryStudentStore, MemoryUserStore};
use registrar_db::postgres::{PgStudentStore, PgUserStore};
use registrar_db::{StudentStore, UserStore, init_db_pool, run_migrations};
use tracing::{info, warn};

/// Shared by every request. Cloning only bumps the store reference counts.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub students: Arc<dyn StudentStore>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub pagination_config: PaginationConfig,
    pub registration_config: RegistrationConfig,
}

impl AppState {
    /// Builds state around the given stores, reading every other setting
    /// from the environment.
    pub fn with_stores(users: Arc<dyn UserStore>, students: Arc<dyn StudentStore>) -> Self {
        Self {
            users,
            students,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            pagination_config: PaginationConfig::from_env(),
            registration_config: RegistrationConfig::from_env(),
        }
    }

    pub fn in_memory() -> Self {
        Self::with_stores(
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryStudentStore::new()),
        )
    }
}

pub async fn init_app_state(server_config: &ServerConfig) -> anyhow::Result<AppState> {
    match server_config.storage {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; all data is lost on restart");
            Ok(AppState::in_memory())
        }
        StorageBackend::Postgres => {
            let database_url = server_config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set when STORAGE_BACKEND=postgres")?;

            let pool = init_db_pool(database_url, server_config.database_max_connections)
                .await
                .context("Failed to connect to database")?;
            run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            info!("Connected to PostgreSQL and applied migrations");

            Ok(AppState::with_stores(
                Arc::new(PgUserStore::new(pool.clone())),
                Arc::new(PgStudentStore::new(pool)),
            ))
        }
    }
}
