use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use template_app_core::ResponseValidationError;
use tracing::{debug, error, info, warn};

use crate::context::{self, RequestContext};

/// Installs the request context for everything downstream and logs the
/// request outcome.
///
/// Must be the outermost layer so every log line of the request, including
/// those of other middleware, carries the context.
pub async fn request_context_middleware(req: Request, next: Next) -> Response {
    let ctx = RequestContext::from_request(&req);
    let request_id = ctx.request_id.clone();

    context::scope(ctx, async move {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req
            .extensions()
            .get::<MatchedPath>()
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| req.uri().path().to_string());

        debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            "Incoming request"
        );

        let response = next.run(req).await;
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let status = response.status().as_u16();

        match status {
            400..=499 => warn!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status,
                latency_ms,
                "Client error"
            ),
            500..=599 => error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status,
                latency_ms,
                "Server error"
            ),
            _ => info!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status,
                latency_ms,
                "Request completed"
            ),
        }

        response
    })
    .await
}

/// Contains responses that failed their declared shape.
///
/// A response tagged with [`ResponseValidationError`] is logged on a single
/// line and replaced with a plain `500 Internal Server Error`, so neither the
/// validation details nor a multi-line report reach the client or the log
/// sink. Every other response passes through untouched.
pub async fn response_validation_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let Some(failure) = response.extensions().get::<ResponseValidationError>() else {
        return response;
    };

    let errors = serde_json::to_string(&failure.errors).unwrap_or_default();
    error!(
        method = %method,
        path = %path,
        errors = %errors,
        "{failure}"
    );

    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}
