use axum::Json;
use template_app_core::{AppError, ValidatedJson};
use template_app_db::DbSession;
use tracing::{error, instrument};

use crate::modules::v1::model::{HealthResponse, MessageResponse};

#[utoipa::path(
    get,
    path = "/v1",
    responses(
        (status = 200, description = "Greeting", body = MessageResponse)
    ),
    tag = "v1"
)]
#[instrument]
pub async fn root() -> ValidatedJson<MessageResponse> {
    ValidatedJson(MessageResponse::new("Hello World"))
}

#[utoipa::path(
    get,
    path = "/v1/health",
    responses(
        (status = 200, description = "Service and database are up", body = HealthResponse),
        (status = 503, description = "Database unavailable")
    ),
    tag = "v1"
)]
#[instrument(skip(db))]
pub async fn health(mut db: DbSession) -> Result<Json<HealthResponse>, AppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&mut *db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database health check failed");
            AppError::service_unavailable(anyhow::anyhow!("Database unavailable"))
        })?;

    Ok(Json(HealthResponse::ok()))
}
