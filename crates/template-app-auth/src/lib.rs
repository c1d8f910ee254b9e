//! # Template App Auth
//!
//! Authentication for tenant-scoped endpoints.
//!
//! Every route under `/geo_companies/{geo_company_id}` is guarded by an
//! [`Authenticator`]. The production implementation,
//! [`GeoCompanyTokenAuth`], forwards the caller's `Authorization` header to
//! the account service and accepts the request only when the account service
//! confirms the token for that geo company. Verdicts are never cached: each
//! protected request makes exactly one outbound call.
//!
//! Tests swap the authenticator in the application state for [`AllowAll`]
//! instead of touching route definitions.
//!
//! - [`authenticator`]: The [`Authenticator`] seam and its implementations
//! - [`credentials`]: Parsed `Authorization` header values
//! - [`error`]: Authentication failures and their HTTP mapping

pub mod authenticator;
pub mod credentials;
pub mod error;

// Re-export commonly used types at crate root
pub use authenticator::{AllowAll, AuthRequest, Authenticator, GeoCompanyTokenAuth};
pub use credentials::BearerCredentials;
pub use error::AuthError;
