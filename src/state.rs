use std::fmt;
use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;
use template_app_auth::{Authenticator, GeoCompanyTokenAuth};
use template_app_config::Settings;
use template_app_db::connect_pool;

/// Shared application state, cloned into every handler.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: PgPool,
    pub settings: Arc<Settings>,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    /// State backed by the account service named in `settings`.
    pub fn new(db: PgPool, settings: Settings) -> Self {
        let authenticator = Arc::new(GeoCompanyTokenAuth::new(&settings.account_service));
        Self {
            db,
            settings: Arc::new(settings),
            authenticator,
        }
    }

    /// Replaces the authenticator guarding tenant-scoped routes.
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

pub fn init_app_state(settings: Settings) -> Result<AppState, sqlx::Error> {
    let db = connect_pool(&settings.database)?;
    Ok(AppState::new(db, settings))
}
