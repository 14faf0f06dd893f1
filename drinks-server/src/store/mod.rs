use crate::config::StoreConfig;
use crate::errors::ApiError;
use crate::models::{Drink, NewDrink};
use log::{info, warn};
use std::sync::Arc;
use thiserror::Error;

pub mod memory;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Drink {0} not found")]
    NotFound(u64),
    #[error("A drink titled '{0}' already exists")]
    DuplicateTitle(String),
    #[error("Failed to serialize value: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Stored recipe of drink {0} is corrupt: {1}")]
    Corrupt(u64, String),
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::not_found(),
            StoreError::DuplicateTitle(_) => ApiError::unprocessable(err.to_string()),
            other => ApiError::internal(other),
        }
    }
}

/// Persistence collaborator for drink records.
///
/// Implementations serialize conflicting writes themselves; every mutation is
/// committed as a whole or not at all.
#[async_trait::async_trait]
pub trait DrinkStore: Send + Sync {
    /// All drinks ordered by id
    async fn all(&self) -> Result<Vec<Drink>, StoreError>;

    /// A single drink, if present
    async fn get(&self, id: u64) -> Result<Option<Drink>, StoreError>;

    /// Store a new drink and return it with its assigned id
    async fn insert(&self, drink: NewDrink) -> Result<Drink, StoreError>;

    /// Replace an existing drink
    async fn update(&self, drink: &Drink) -> Result<(), StoreError>;

    /// Remove an existing drink
    async fn delete(&self, id: u64) -> Result<(), StoreError>;

    /// Drop every record
    async fn reset(&self) -> Result<(), StoreError>;

    /// Returns Ok(()) if healthy, or Err with a descriptive message if unhealthy.
    async fn health_check(&self) -> Result<(), String>;
}

/// Create the store described by the configuration, resetting it only when asked to
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn DrinkStore>, StoreError> {
    let store = match &config.path {
        Some(path) => {
            info!("Using drink snapshot at {}", path.display());
            memory::InMemoryDrinkStore::open(path.clone()).await?
        }
        None => memory::InMemoryDrinkStore::new(),
    };

    if config.reset_on_start {
        warn!("Resetting drink store on startup");
        store.reset().await?;
    }

    Ok(Arc::new(store))
}
