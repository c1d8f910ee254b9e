//! Tenant authentication middleware.
//!
//! Installed as a route layer on the tenant router, so it only runs for
//! requests that matched a route under `/geo_companies/{geo_company_id}`.

use axum::{
    extract::{FromRequestParts, RawPathParams, Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use template_app_auth::{AuthError, AuthRequest};
use template_app_core::AppError;
use tracing::debug;

use crate::state::AppState;

/// Path parameter naming the tenant a request acts for.
pub const GEO_COMPANY_PARAM: &str = "geo_company_id";

/// Authenticates the request for the geo company in its path.
///
/// On success the caller's [`BearerCredentials`](template_app_auth::BearerCredentials)
/// are stored in the request extensions for handlers to pick up. On failure
/// the handler never runs.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// let tenant_routes = Router::new()
///     .nest("/v1", init_v1_router())
///     .route_layer(middleware::from_fn_with_state(
///         state.clone(),
///         require_geo_company_auth,
///     ));
/// ```
pub async fn require_geo_company_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let params = RawPathParams::from_request_parts(&mut parts, &state)
        .await
        .ok();
    let geo_company_id = params.as_ref().and_then(|params| {
        params
            .iter()
            .find(|(name, _)| *name == GEO_COMPANY_PARAM)
            .map(|(_, value)| value)
    });

    let credentials = state
        .authenticator
        .authenticate(AuthRequest {
            geo_company_id,
            authorization: parts.headers.get(header::AUTHORIZATION),
        })
        .await
        .map_err(AuthError::into_app_error)?;

    debug!(geo_company_id, scheme = %credentials.scheme, "Request authenticated");

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(credentials);
    Ok(next.run(req).await)
}
