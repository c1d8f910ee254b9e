use axum::http::HeaderValue;
use axum::routing::get;
use axum::{Router, middleware};
use template_app_config::CorsConfig;
use template_app_observability::{request_context_middleware, response_validation_middleware};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

use crate::docs::{ApiDoc, TENANT_PREFIX, openapi_json};
use crate::middleware::require_geo_company_auth;
use crate::modules::index::init_index_router;
use crate::modules::v1::init_v1_router;
use crate::state::AppState;

/// Builds the full application.
///
/// Layers, outermost first: request context, response validation, CORS,
/// then the routes. Tenant authentication is a route layer, so it only runs
/// for requests that matched a tenant-scoped route.
pub fn init_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.cors);

    Router::new()
        .merge(init_index_router())
        .nest("/v1", init_v1_router())
        .nest(
            TENANT_PREFIX,
            Router::new()
                .nest("/v1", init_v1_router())
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_geo_company_auth,
                )),
        )
        .route("/openapi.json", get(openapi_json))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(response_validation_middleware))
        .layer(middleware::from_fn(request_context_middleware))
}

/// Credentials are allowed, which rules out a literal `*` in the response
/// headers. A configured wildcard therefore mirrors the request instead.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    if config.allows_any() {
        return layer.allow_origin(AllowOrigin::mirror_request());
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.as_header_value().parse().ok())
        .collect();

    layer.allow_origin(allowed_origins)
}
