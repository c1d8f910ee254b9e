use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::http::header;
use serde::Serialize;

/// Summary of the inbound request, shaped like Cloud Logging's `HttpRequest`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestInfo {
    pub request_method: String,
    pub request_url: String,
    pub request_size: u64,
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl HttpRequestInfo {
    pub fn from_request(req: &Request) -> Self {
        let headers = req.headers();
        let header_str = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        // Body size as announced by the client.
        let request_size = header_str(header::CONTENT_LENGTH.as_str())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let protocol = req
            .uri()
            .scheme_str()
            .map(str::to_string)
            .or_else(|| header_str("x-forwarded-proto"))
            .unwrap_or_else(|| "http".to_string());

        let remote_ip = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Self {
            request_method: req.method().to_string(),
            request_url: req.uri().path().to_string(),
            request_size,
            protocol,
            remote_ip,
            referrer: header_str(header::REFERER.as_str()).or_else(|| header_str("referrer")),
            user_agent: header_str(header::USER_AGENT.as_str()),
        }
    }
}
