use async_trait::async_trait;
use axum::http::{HeaderValue, StatusCode, header};
use reqwest::Client;
use template_app_config::AccountServiceConfig;
use tracing::{Instrument, debug, field, info_span, warn};
use url::Url;

use crate::credentials::BearerCredentials;
use crate::error::AuthError;

/// What an authenticator gets to see of the incoming request.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthRequest<'a> {
    /// `geo_company_id` path parameter, if the matched route has one.
    pub geo_company_id: Option<&'a str>,
    /// Raw `Authorization` header.
    pub authorization: Option<&'a HeaderValue>,
}

/// Decides whether a request may act for the geo company in its path.
#[async_trait]
pub trait Authenticator: Send + Sync + 'static {
    async fn authenticate(&self, request: AuthRequest<'_>) -> Result<BearerCredentials, AuthError>;
}

/// Validates the `Authorization` header against the account service.
///
/// Issues `GET {host}/account/v2/geo_companies/{id}/check_auth_token/` with
/// the header forwarded verbatim. Anything but 200 rejects the request with
/// the account service's status. One attempt, no retry, and the client's
/// default timeouts.
#[derive(Clone, Debug)]
pub struct GeoCompanyTokenAuth {
    client: Client,
    host: Url,
}

impl GeoCompanyTokenAuth {
    pub fn new(config: &AccountServiceConfig) -> Self {
        Self::with_client(Client::new(), config.host.clone())
    }

    pub fn with_client(client: Client, host: Url) -> Self {
        Self { client, host }
    }

    /// Token check endpoint for `geo_company_id`. Any path on the configured
    /// host is replaced, and the id is encoded as a single segment.
    pub fn check_url(&self, geo_company_id: &str) -> Result<Url, AuthError> {
        let mut url = self.host.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| AuthError::InvalidHost)?
            .clear()
            .extend([
                "account",
                "v2",
                "geo_companies",
                geo_company_id,
                "check_auth_token",
                "",
            ]);
        Ok(url)
    }
}

#[async_trait]
impl Authenticator for GeoCompanyTokenAuth {
    async fn authenticate(&self, request: AuthRequest<'_>) -> Result<BearerCredentials, AuthError> {
        let geo_company_id = request
            .geo_company_id
            .filter(|id| !id.is_empty())
            .ok_or(AuthError::MissingGeoCompany)?;

        let authorization = request
            .authorization
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::MissingAuthorization)?;

        let url = self.check_url(geo_company_id)?;
        let span = info_span!(
            "http.client",
            service.name = "account-service",
            http.method = "GET",
            http.url = %url,
            http.status_code = field::Empty,
            geo_company_id = %geo_company_id,
        );

        let status = async {
            let response = self
                .client
                .get(url)
                .header(header::AUTHORIZATION, authorization.clone())
                .send()
                .await?;
            let status = response.status();
            tracing::Span::current().record("http.status_code", status.as_u16());
            Ok::<_, AuthError>(status)
        }
        .instrument(span)
        .await
        .inspect_err(|e| warn!(error = %e, geo_company_id, "Account service unreachable"))?;

        if status != StatusCode::OK {
            warn!(
                geo_company_id,
                status = status.as_u16(),
                "Account service rejected token"
            );
            return Err(AuthError::Rejected(status));
        }

        debug!(geo_company_id, "Token accepted by account service");
        Ok(BearerCredentials::from_header(authorization))
    }
}

/// Accepts every request without any outbound call. Meant for tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

#[async_trait]
impl Authenticator for AllowAll {
    async fn authenticate(&self, request: AuthRequest<'_>) -> Result<BearerCredentials, AuthError> {
        Ok(request
            .authorization
            .map(BearerCredentials::from_header)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(host: &str) -> GeoCompanyTokenAuth {
        GeoCompanyTokenAuth::new(&AccountServiceConfig::new(Url::parse(host).unwrap()))
    }

    #[test]
    fn test_check_url() {
        let url = auth("https://accounts.example.com").check_url("42").unwrap();
        assert_eq!(
            url.as_str(),
            "https://accounts.example.com/account/v2/geo_companies/42/check_auth_token/"
        );
    }

    #[test]
    fn test_check_url_replaces_host_path() {
        let url = auth("http://accounts.internal:8080/api/?debug=1")
            .check_url("acme")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://accounts.internal:8080/account/v2/geo_companies/acme/check_auth_token/"
        );
    }

    #[test]
    fn test_check_url_encodes_id_as_one_segment() {
        let url = auth("http://accounts.internal").check_url("a/b").unwrap();
        assert_eq!(
            url.path(),
            "/account/v2/geo_companies/a%2Fb/check_auth_token/"
        );
    }

    #[tokio::test]
    async fn test_missing_geo_company_id() {
        let header = HeaderValue::from_static("Bearer abc");
        let result = auth("http://127.0.0.1:1")
            .authenticate(AuthRequest {
                geo_company_id: None,
                authorization: Some(&header),
            })
            .await;
        assert!(matches!(result, Err(AuthError::MissingGeoCompany)));
    }

    #[tokio::test]
    async fn test_missing_authorization() {
        let result = auth("http://127.0.0.1:1")
            .authenticate(AuthRequest {
                geo_company_id: Some("42"),
                authorization: None,
            })
            .await;
        assert!(matches!(result, Err(AuthError::MissingAuthorization)));
    }

    #[tokio::test]
    async fn test_unreachable_account_service() {
        let header = HeaderValue::from_static("Bearer abc");
        let err = auth("http://127.0.0.1:1")
            .authenticate(AuthRequest {
                geo_company_id: Some("42"),
                authorization: Some(&header),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Upstream(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_allow_all() {
        let header = HeaderValue::from_static("Bearer abc");
        let creds = AllowAll
            .authenticate(AuthRequest {
                geo_company_id: None,
                authorization: Some(&header),
            })
            .await
            .unwrap();
        assert_eq!(creds.credentials, "abc");

        let creds = AllowAll.authenticate(AuthRequest::default()).await.unwrap();
        assert_eq!(creds, BearerCredentials::default());
    }
}
