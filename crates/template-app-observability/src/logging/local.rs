use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Console layer for running outside Cloud Run.
///
/// - **Format**: compact, with module path, file and line
/// - **Colors**: on; the console is the only consumer
pub fn console_layer(filter: EnvFilter) -> impl Layer<Registry> + Send + Sync {
    fmt::layer()
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(true)
        .with_filter(filter)
}
