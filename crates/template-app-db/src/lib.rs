//! # Template App DB
//!
//! Database pool and per-request sessions for the template app.
//!
//! The pool connects lazily, so the process starts even when PostgreSQL is
//! not reachable yet; connection errors surface on the first request that
//! needs a session.
//!
//! # Example
//!
//! ```ignore
//! use template_app_db::{DbSession, connect_pool};
//!
//! let pool = connect_pool(&settings.database)?;
//!
//! async fn handler(mut db: DbSession) -> Result<(), AppError> {
//!     sqlx::query("SELECT 1").execute(&mut *db).await?;
//!     db.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod session;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use template_app_config::DatabaseConfig;

// Re-export PgPool for convenience
pub use session::DbSession;
pub use sqlx::PgPool;

/// Builds the PostgreSQL connection pool.
///
/// Only the connection string is checked here. Connections are opened on
/// demand, bounded by `max_connections`, and a request waits at most
/// `acquire_timeout` for one.
///
/// # Errors
///
/// Returns an error if `config.url` is not a valid PostgreSQL URL.
pub fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options: PgConnectOptions = config.url.parse()?;

    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(options))
}
