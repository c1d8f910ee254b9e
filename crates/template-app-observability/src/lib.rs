//! Template App Observability
//!
//! Request-scoped logging context and the two logging backends:
//! - Request metadata (trace header, HTTP request summary) kept in task-local storage
//! - A local console backend and a Cloud Run backend emitting structured JSON lines
//! - HTTP middleware that installs the context and contains response validation failures
//!
//! The backend is chosen once at startup from [`LoggingConfig`](template_app_config::LoggingConfig).
//!
//! # Examples
//!
//! ```no_run
//! use template_app_config::Settings;
//! use template_app_observability::init_logging;
//!
//! let settings = Settings::load().expect("settings");
//! let _guard = init_logging(&settings.logging).expect("logging");
//! tracing::info!("ready");
//! ```

pub mod context;
pub mod http_request;
pub mod logging;
pub mod middleware;
pub mod trace_context;

pub use context::RequestContext;
pub use http_request::HttpRequestInfo;
pub use logging::{CloudLogFormat, LoggingGuard, init_logging};
pub use middleware::{request_context_middleware, response_validation_middleware};
pub use trace_context::CloudTraceContext;
