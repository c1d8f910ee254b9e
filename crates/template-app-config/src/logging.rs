//! Logging backend selection.
//!
//! Cloud Run sets `K_REVISION` on every instance. When it is present the
//! structured cloud backend is used and `GOOGLE_CLOUD_PROJECT` must name the
//! project the trace ids belong to. Otherwise logs go to the local console.
//!
//! `LOG_LEVEL` sets the default level for both backends (default: `info`).

use crate::error::ConfigError;
use crate::vars::{Lookup, optional, required};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogBackend {
    Local,
    Cloud { project: String, revision: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub backend: LogBackend,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            backend: LogBackend::Local,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub(crate) fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let backend = match optional(lookup, "K_REVISION") {
            Some(revision) => LogBackend::Cloud {
                project: required(lookup, "GOOGLE_CLOUD_PROJECT")?,
                revision,
            },
            None => LogBackend::Local,
        };

        Ok(Self {
            backend,
            level: optional(lookup, "LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn is_cloud(&self) -> bool {
        matches!(self.backend, LogBackend::Cloud { .. })
    }
}
