use std::sync::Arc;

use sea_orm::DatabaseConnection;

use configs::AuthSettings;
use service::auth::{repo::SeaOrmCredentialStore, AuthService, RegistrationPolicy, TokenService};

use crate::rate_limit::LoginLimiter;

pub type ClinicAuthService = AuthService<SeaOrmCredentialStore>;

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<ClinicAuthService>,
    pub tokens: TokenService,
    pub login_limiter: LoginLimiter,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, settings: &AuthSettings) -> anyhow::Result<Self> {
        let tokens = TokenService::from_settings(settings);
        let policy = RegistrationPolicy::from_settings(settings)?;
        let store = Arc::new(SeaOrmCredentialStore::new(db.clone()));
        Ok(Self {
            auth: Arc::new(AuthService::new(store, tokens.clone(), policy)),
            tokens,
            login_limiter: LoginLimiter::from_settings(settings),
            db,
        })
    }
}
