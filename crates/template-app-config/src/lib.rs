//! # Template App Config
//!
//! Configuration types for the template app.
//!
//! Everything is resolved once at startup into an immutable [`Settings`]
//! value, which is then shared through the application state. Values come
//! from the process environment first and from an environment-specific
//! dotenv file second (`.env.dev` or `.env.prod`, picked by `ENV`).
//!
//! - [`account_service`]: Base URL of the external account service
//! - [`cors`]: Allowed CORS origins
//! - [`database`]: PostgreSQL connection settings
//! - [`logging`]: Logging backend selection and level
//! - [`server`]: Listen address
//! - [`settings`]: The aggregate [`Settings`] and its loader
//!
//! # Example
//!
//! ```ignore
//! use template_app_config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("running in {}", settings.env);
//! ```

pub mod account_service;
pub mod cors;
pub mod database;
pub mod error;
pub mod logging;
pub mod server;
pub mod settings;
mod vars;

// Re-export commonly used types at crate root
pub use account_service::AccountServiceConfig;
pub use cors::{CorsConfig, CorsOrigin};
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use logging::{LogBackend, LoggingConfig};
pub use server::ServerConfig;
pub use settings::{Environment, Settings};
