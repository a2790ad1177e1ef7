//! # Registrar DB
//!
//! Persistence for the Registrar API.
//!
//! The rest of the application only sees the [`UserStore`] and
//! [`StudentStore`] traits. Two backends implement them:
//!
//! - [`postgres`]: SQLx/PostgreSQL, uniqueness enforced by table constraints
//! - [`memory`]: process-local, for development and tests
//!
//! # Example
//!
//! ```ignore
//! use registrar_db::{init_db_pool, run_migrations, postgres::PgStudentStore};
//!
//! let pool = init_db_pool(&database_url, 10).await?;
//! run_migrations(&pool).await?;
//! let students = PgStudentStore::new(pool.clone());
//! ```

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod postgres;
pub mod store;

pub use store::{StoreError, StudentStore, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Schema migrations, embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Opens a PostgreSQL connection pool.
///
/// Call once at startup; the pool is cheaply cloneable and shared by every
/// request.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
