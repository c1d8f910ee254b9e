use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use template_app_core::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The route carries no `geo_company_id` path parameter.
    #[error("No geo_company_id provided.")]
    MissingGeoCompany,

    /// No `Authorization` header on the request.
    #[error("Not authenticated")]
    MissingAuthorization,

    /// The account service answered with something other than 200.
    #[error("account service rejected token with status {0}")]
    Rejected(StatusCode),

    /// The account service could not be reached or did not answer.
    #[error("account service request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The configured account service host cannot be used as a base URL.
    #[error("account service host is not a valid base URL")]
    InvalidHost,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingGeoCompany | Self::MissingAuthorization => StatusCode::FORBIDDEN,
            Self::Rejected(status) => *status,
            Self::Upstream(_) | Self::InvalidHost => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AuthError {
    /// Maps the failure onto the application error response.
    ///
    /// Not a `From` impl: the blanket conversion in `template_app_core`
    /// would turn every `AuthError` into a 500.
    pub fn into_app_error(self) -> AppError {
        match self {
            Self::MissingGeoCompany | Self::MissingAuthorization => {
                AppError::forbidden(anyhow::anyhow!(self.to_string()))
            }
            Self::Rejected(status) => AppError::from_status(status),
            Self::Upstream(_) | Self::InvalidHost => {
                AppError::internal(anyhow::anyhow!("Internal Server Error"))
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.into_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_are_forbidden() {
        assert_eq!(AuthError::MissingGeoCompany.status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::MissingAuthorization.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_rejection_mirrors_downstream_status() {
        let err = AuthError::Rejected(StatusCode::UNAUTHORIZED);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);

        let app_error = err.into_app_error();
        assert_eq!(app_error.status, StatusCode::UNAUTHORIZED);
        assert_eq!(app_error.error.to_string(), "Unauthorized");
    }

    #[test]
    fn test_missing_authorization_message() {
        let app_error = AuthError::MissingAuthorization.into_app_error();
        assert_eq!(app_error.error.to_string(), "Not authenticated");
    }
}
