use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::PostStore;

/// Shared, read-only handles every request needs. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PostStore>,
    pub jwt_secret: Arc<str>,
    pub legacy_validation_status: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn PostStore>, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            jwt_secret: jwt_secret.into(),
            legacy_validation_status: true,
        }
    }

    pub fn from_config(config: &AppConfig, store: Arc<dyn PostStore>) -> Self {
        Self {
            legacy_validation_status: config.api.legacy_validation_status,
            ..Self::new(store, config.security.jwt_secret.as_str())
        }
    }
}
