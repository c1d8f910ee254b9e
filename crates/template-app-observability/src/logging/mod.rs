//! Logging backend setup.
//!
//! [`init_logging`] installs the global subscriber once at startup:
//!
//! - **Local** (no `K_REVISION`): compact console output
//! - **Cloud** (`K_REVISION` present): one JSON object per line on stdout,
//!   formatted by [`CloudLogFormat`] and written through a non-blocking
//!   writer
//!
//! Both honor `RUST_LOG` when set and otherwise use the configured level,
//! with chatty dependencies capped at `warn`.

pub mod cloud;
pub mod local;

pub use cloud::{CloudLogFormat, CloudLogRecord};

use template_app_config::{LogBackend, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt};

/// Keeps the cloud backend's writer thread alive. Hold it until shutdown so
/// buffered lines are flushed.
#[must_use = "dropping the guard stops log output"]
pub struct LoggingGuard {
    _worker: Option<WorkerGuard>,
}

pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{level},tower_http=warn,hyper=warn,h2=warn,sqlx=warn,reqwest=warn"
        ))
    })
}

/// Installs the logging backend selected by `config`.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, TryInitError> {
    let filter = env_filter(&config.level);

    match &config.backend {
        LogBackend::Local => {
            tracing_subscriber::registry()
                .with(local::console_layer(filter))
                .try_init()?;

            Ok(LoggingGuard { _worker: None })
        }
        LogBackend::Cloud { project, revision } => {
            let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());

            let cloud_layer = fmt::layer()
                .event_format(CloudLogFormat::new(project.clone()))
                .with_writer(writer)
                .with_filter(filter);

            tracing_subscriber::registry().with(cloud_layer).try_init()?;
            tracing::info!(project = %project, revision = %revision, "Cloud logging initialized");

            Ok(LoggingGuard {
                _worker: Some(guard),
            })
        }
    }
}
