use std::ops::{Deref, DerefMut};

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use template_app_core::AppError;
use tracing::error;

/// Database session scoped to one request.
///
/// Extracting it begins a transaction. Call [`DbSession::commit`] to keep
/// the changes; if the handler returns early or errors, the transaction is
/// dropped and rolled back when the request ends.
#[derive(Debug)]
pub struct DbSession(Transaction<'static, Postgres>);

impl DbSession {
    pub async fn begin(pool: &PgPool) -> Result<Self, sqlx::Error> {
        pool.begin().await.map(Self)
    }

    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.0.commit().await
    }

    pub async fn rollback(self) -> Result<(), sqlx::Error> {
        self.0.rollback().await
    }
}

impl Deref for DbSession {
    type Target = PgConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<S> FromRequestParts<S> for DbSession
where
    PgPool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = PgPool::from_ref(state);

        Self::begin(&pool).await.map_err(|e| {
            error!(error = %e, "Failed to open database session");
            AppError::service_unavailable(anyhow::anyhow!("Database unavailable"))
        })
    }
}
