use crate::auth::{Guard, Permission, TokenVerifier};
use crate::config::{ConfigError, Settings};
use crate::store::{create_store, DrinkStore, StoreError};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while wiring the application together
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to open drink store: {0}")]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub store: Arc<dyn DrinkStore>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub async fn new(settings: Settings) -> Result<Self, StartupError> {
        let store = create_store(&settings.store).await?;
        Self::with_store(settings, store)
    }

    /// Build the state around an already opened store
    pub fn with_store(
        settings: Settings,
        store: Arc<dyn DrinkStore>,
    ) -> Result<Self, StartupError> {
        let verifier = TokenVerifier::from_config(&settings.auth)?;
        let state = Self {
            settings: Arc::new(settings),
            store,
            verifier: Arc::new(verifier),
        };
        log::info!(
            "Accepting tokens for audience '{}' issued by '{}'",
            state.settings.auth.audience,
            state.settings.auth.issuer_url()
        );
        Ok(state)
    }

    /// Middleware state requiring `permission` for the guarded handler
    pub fn guard(&self, permission: Permission) -> Guard {
        Guard::new(self.verifier.clone(), permission)
    }

    /// Check if all components are healthy
    pub async fn health_check(&self) -> bool {
        match self.store.health_check().await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Store health check failed: {}", e);
                false
            }
        }
    }
}
