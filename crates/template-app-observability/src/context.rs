//! Request-scoped logging context.
//!
//! Each request runs inside its own tokio task-local scope, so concurrently
//! interleaved requests on the same worker thread only ever see their own
//! trace id and HTTP metadata. Code outside a request scope (startup,
//! background tasks, spawned tasks) sees no context at all.

use std::future::Future;

use axum::extract::Request;
use uuid::Uuid;

use crate::http_request::HttpRequestInfo;
use crate::trace_context::{CLOUD_TRACE_HEADER, CloudTraceContext};

tokio::task_local! {
    static REQUEST_CONTEXT: RequestContext;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: String,
    pub trace: Option<CloudTraceContext>,
    pub http_request: HttpRequestInfo,
}

impl RequestContext {
    pub fn from_request(req: &Request) -> Self {
        let trace = req
            .headers()
            .get(CLOUD_TRACE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(CloudTraceContext::parse);

        Self {
            request_id: Uuid::new_v4().to_string(),
            trace,
            http_request: HttpRequestInfo::from_request(req),
        }
    }
}

/// Runs `fut` with `ctx` as the current request context.
pub async fn scope<F>(ctx: RequestContext, fut: F) -> F::Output
where
    F: Future,
{
    REQUEST_CONTEXT.scope(ctx, fut).await
}

/// Context of the request being served by the current task, if any.
pub fn current() -> Option<RequestContext> {
    REQUEST_CONTEXT.try_with(RequestContext::clone).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn context_for(trace_header: &str) -> RequestContext {
        let req = axum::http::Request::builder()
            .uri("/v1")
            .header(CLOUD_TRACE_HEADER, trace_header)
            .body(Body::empty())
            .unwrap();
        RequestContext::from_request(&req)
    }

    #[test]
    fn test_from_request_reads_trace_header() {
        let ctx = context_for("trace-a/7;o=1");
        let trace = ctx.trace.unwrap();
        assert_eq!(trace.trace_id, "trace-a");
        assert_eq!(trace.span_id.as_deref(), Some("7"));
        assert_eq!(ctx.http_request.request_url, "/v1");
    }

    #[tokio::test]
    async fn test_no_context_outside_scope() {
        assert!(current().is_none());
    }

    #[tokio::test]
    async fn test_interleaved_scopes_are_isolated() {
        let a = scope(context_for("trace-a/1"), async {
            for _ in 0..3 {
                tokio::task::yield_now().await;
                assert_eq!(current().unwrap().trace.unwrap().trace_id, "trace-a");
            }
        });
        let b = scope(context_for("trace-b/2"), async {
            for _ in 0..3 {
                tokio::task::yield_now().await;
                assert_eq!(current().unwrap().trace.unwrap().trace_id, "trace-b");
            }
        });

        tokio::join!(a, b);
        assert!(current().is_none());
    }
}
