//! `X-Cloud-Trace-Context` header parsing.
//!
//! Format: `TRACE_ID/SPAN_ID;o=OPTIONS`. Only the trace id is mandatory.

use serde::Serialize;

pub const CLOUD_TRACE_HEADER: &str = "x-cloud-trace-context";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CloudTraceContext {
    pub trace_id: String,
    pub span_id: Option<String>,
}

impl CloudTraceContext {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();

        let (trace_id, span_id) = match raw.split_once('/') {
            Some((trace_id, suffix)) => {
                let span: String = suffix
                    .chars()
                    .take_while(|c| c.is_alphanumeric() || *c == '_')
                    .collect();
                (trace_id, Some(span).filter(|s| !s.is_empty()))
            }
            None => (raw.split(';').next().unwrap_or_default(), None),
        };

        if trace_id.is_empty() {
            return None;
        }

        Some(Self {
            trace_id: trace_id.to_string(),
            span_id,
        })
    }

    /// Fully qualified trace name understood by Cloud Logging.
    pub fn resource_name(&self, project: &str) -> String {
        format!("projects/{project}/traces/{}", self.trace_id)
    }
}
