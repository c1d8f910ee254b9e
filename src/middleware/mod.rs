pub mod auth;

pub use auth::{GEO_COMPANY_PARAM, require_geo_company_auth};
