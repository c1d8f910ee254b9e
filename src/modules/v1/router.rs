use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{health, root};

/// Version 1 routes. Mounted twice: at `/v1` and, behind tenant
/// authentication, at `/geo_companies/{geo_company_id}/v1`.
pub fn init_v1_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}
