use super::{DrinkStore, StoreError};
use crate::models::{Drink, Ingredient, NewDrink};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Stored row; the recipe is kept as an opaque JSON blob
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Record {
    title: String,
    recipe: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Snapshot {
    last_id: u64,
    records: BTreeMap<u64, Record>,
}

impl Snapshot {
    fn title_taken(&self, title: &str, except: Option<u64>) -> bool {
        self.records
            .iter()
            .any(|(id, record)| Some(*id) != except && record.title == title)
    }
}

/// Drink store held in memory, optionally mirrored to a JSON snapshot file.
///
/// Writers hold the lock for the whole mutation including the snapshot write,
/// and the in-memory state only changes once the snapshot is on disk.
pub struct InMemoryDrinkStore {
    state: RwLock<Snapshot>,
    path: Option<PathBuf>,
}

impl InMemoryDrinkStore {
    /// Initialize an empty store without a snapshot file
    pub fn new() -> Self {
        Self {
            state: RwLock::new(Snapshot::default()),
            path: None,
        }
    }

    /// Open a store mirrored to `path`, loading the snapshot if it exists
    pub async fn open(path: PathBuf) -> Result<Self, StoreError> {
        let snapshot = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => return Err(StoreError::Io(e)),
        };
        debug!(
            "Loaded {} drinks from {}",
            snapshot.records.len(),
            path.display()
        );
        Ok(Self {
            state: RwLock::new(snapshot),
            path: Some(path),
        })
    }

    async fn persist(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, serde_json::to_vec(snapshot)?).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    fn decode(id: u64, record: &Record) -> Result<Drink, StoreError> {
        let recipe: Vec<Ingredient> = serde_json::from_str(&record.recipe)
            .map_err(|e| StoreError::Corrupt(id, e.to_string()))?;
        Ok(Drink {
            id,
            title: record.title.clone(),
            recipe,
        })
    }
}

impl Default for InMemoryDrinkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DrinkStore for InMemoryDrinkStore {
    async fn all(&self) -> Result<Vec<Drink>, StoreError> {
        let state = self.state.read().await;
        state
            .records
            .iter()
            .map(|(id, record)| Self::decode(*id, record))
            .collect()
    }

    async fn get(&self, id: u64) -> Result<Option<Drink>, StoreError> {
        let state = self.state.read().await;
        state
            .records
            .get(&id)
            .map(|record| Self::decode(id, record))
            .transpose()
    }

    async fn insert(&self, drink: NewDrink) -> Result<Drink, StoreError> {
        let mut state = self.state.write().await;
        if state.title_taken(&drink.title, None) {
            return Err(StoreError::DuplicateTitle(drink.title));
        }

        let mut next = state.clone();
        next.last_id += 1;
        let id = next.last_id;
        next.records.insert(
            id,
            Record {
                title: drink.title.clone(),
                recipe: serde_json::to_string(&drink.recipe)?,
            },
        );
        self.persist(&next).await?;
        *state = next;

        debug!("Inserted drink {} '{}'", id, drink.title);
        Ok(Drink {
            id,
            title: drink.title,
            recipe: drink.recipe,
        })
    }

    async fn update(&self, drink: &Drink) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if !state.records.contains_key(&drink.id) {
            return Err(StoreError::NotFound(drink.id));
        }
        if state.title_taken(&drink.title, Some(drink.id)) {
            return Err(StoreError::DuplicateTitle(drink.title.clone()));
        }

        let mut next = state.clone();
        next.records.insert(
            drink.id,
            Record {
                title: drink.title.clone(),
                recipe: serde_json::to_string(&drink.recipe)?,
            },
        );
        self.persist(&next).await?;
        *state = next;

        debug!("Updated drink {}", drink.id);
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if !state.records.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }

        let mut next = state.clone();
        next.records.remove(&id);
        self.persist(&next).await?;
        *state = next;

        debug!("Deleted drink {}", id);
        Ok(())
    }

    async fn reset(&self) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let next = Snapshot::default();
        self.persist(&next).await?;
        *state = next;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), String> {
        if let Some(path) = &self.path {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            if !tokio::fs::try_exists(&dir).await.unwrap_or(false) {
                return Err(format!("snapshot directory {} is missing", dir.display()));
            }
        }
        Ok(())
    }
}
