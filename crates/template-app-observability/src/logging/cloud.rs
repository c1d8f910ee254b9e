//! Structured logging for Cloud Run.
//!
//! Cloud Run forwards each stdout line that is a JSON object to Cloud
//! Logging as a structured entry. Besides `severity` and `message`, a few
//! special keys are lifted into the log entry itself:
//!
//! | Key | Source |
//! |-----|--------|
//! | `logging.googleapis.com/trace` | `projects/{project}/traces/{trace id}` from `X-Cloud-Trace-Context` |
//! | `logging.googleapis.com/spanId` | span id from the same header |
//! | `httpRequest` | [`HttpRequestInfo`] of the current request |
//! | `logging.googleapis.com/labels` | `request_id` of the current request |
//! | `logging.googleapis.com/sourceLocation` | file and line of the log call |
//!
//! All remaining event fields end up in the entry's `jsonPayload`. Every
//! record is one line, so multi-line messages never get split into several
//! entries.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::context::{self, RequestContext};
use crate::http_request::HttpRequestInfo;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: String,
}

/// One Cloud Logging entry as written to stdout.
#[derive(Clone, Debug, Serialize)]
pub struct CloudLogRecord {
    pub severity: &'static str,
    pub message: String,
    pub time: String,
    pub target: String,
    #[serde(
        rename = "logging.googleapis.com/trace",
        skip_serializing_if = "Option::is_none"
    )]
    pub trace: Option<String>,
    #[serde(
        rename = "logging.googleapis.com/spanId",
        skip_serializing_if = "Option::is_none"
    )]
    pub span_id: Option<String>,
    #[serde(rename = "httpRequest", skip_serializing_if = "Option::is_none")]
    pub http_request: Option<HttpRequestInfo>,
    #[serde(
        rename = "logging.googleapis.com/labels",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,
    #[serde(
        rename = "logging.googleapis.com/sourceLocation",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_location: Option<SourceLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spans: Vec<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Keys written by [`CloudLogFormat`] itself. Event fields with these names
/// are kept under a `field.` prefix so they cannot shadow the entry's own
/// severity, timestamp or request metadata.
const RESERVED_KEYS: &[&str] = &[
    "severity",
    "message",
    "time",
    "target",
    "spans",
    "httpRequest",
    "logging.googleapis.com/trace",
    "logging.googleapis.com/spanId",
    "logging.googleapis.com/labels",
    "logging.googleapis.com/sourceLocation",
];

/// Event formatter for the cloud backend.
#[derive(Clone, Debug)]
pub struct CloudLogFormat {
    project: String,
}

impl CloudLogFormat {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
        }
    }

    /// Builds the entry for one event, attaching the request context when
    /// the event was emitted while serving a request.
    pub fn record(
        &self,
        metadata: &Metadata<'_>,
        mut fields: Map<String, Value>,
        request: Option<&RequestContext>,
        time: DateTime<Utc>,
    ) -> CloudLogRecord {
        let message = match fields.remove("message") {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        for key in RESERVED_KEYS {
            if let Some(value) = fields.remove(*key) {
                fields.insert(format!("field.{key}"), value);
            }
        }

        let mut record = CloudLogRecord {
            severity: severity(metadata.level()),
            message,
            time: time.to_rfc3339_opts(SecondsFormat::Micros, true),
            target: metadata.target().to_string(),
            trace: None,
            span_id: None,
            http_request: None,
            labels: BTreeMap::new(),
            source_location: metadata.file().zip(metadata.line()).map(|(file, line)| {
                SourceLocation {
                    file: file.to_string(),
                    line: line.to_string(),
                }
            }),
            spans: Vec::new(),
            fields,
        };

        if let Some(ctx) = request {
            if let Some(trace) = &ctx.trace {
                record.trace = Some(trace.resource_name(&self.project));
                record.span_id = trace.span_id.clone();
            }
            record.http_request = Some(ctx.http_request.clone());
            record
                .labels
                .insert("request_id".to_string(), ctx.request_id.clone());
        }

        record
    }
}

impl<S, N> FormatEvent<S, N> for CloudLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let request = context::current();
        let mut record = self.record(event.metadata(), visitor.0, request.as_ref(), Utc::now());
        if let Some(scope) = ctx.event_scope() {
            record.spans = scope.from_root().map(|span| span.name().to_string()).collect();
        }

        let line = serde_json::to_string(&record).map_err(|_| fmt::Error)?;
        writeln!(writer, "{line}")
    }
}

fn severity(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        Level::DEBUG | Level::TRACE => "DEBUG",
    }
}

#[derive(Default)]
struct JsonVisitor(Map<String, Value>);

impl JsonVisitor {
    fn insert(&mut self, field: &Field, value: impl Into<Value>) {
        self.0.insert(field.name().to_string(), value.into());
    }
}

impl Visit for JsonVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, value);
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }
}
