//! Repository layer: durable storage of the entity collections
//!
//! Each collection is one named JSON blob in a key-value medium. Blobs are
//! wrapped in a versioned envelope (`{"version": 1, "records": [...]}`);
//! bare arrays written by older builds are read as version 0.

pub mod file;
pub mod memory;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    config::{StorageBackend, StorageConfig},
    error::{AppError, AppResult},
};

/// Current blob schema version
pub const SCHEMA_VERSION: u64 = 1;

/// Key-value medium holding the serialized collections
#[cfg_attr(test, mockall::automock)]
pub trait KvStore {
    /// Raw blob for `key`, `None` when nothing was ever written
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    fn put(&self, key: &str, value: &str) -> AppResult<()>;
}

/// The five persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Assets,
    Users,
    Rentals,
    Incidents,
    Notifications,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Assets,
        Collection::Users,
        Collection::Rentals,
        Collection::Incidents,
        Collection::Notifications,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Assets => "assets",
            Collection::Users => "users",
            Collection::Rentals => "rentals",
            Collection::Incidents => "incidents",
            Collection::Notifications => "notifications",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Store adapter over a [`KvStore`]
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn KvStore>,
    key_prefix: String,
}

impl Repository {
    pub fn new(store: Arc<dyn KvStore>, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
        }
    }

    /// Open the backend selected in the storage configuration
    pub fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let store: Arc<dyn KvStore> = match config.backend {
            StorageBackend::File => Arc::new(file::FileStore::open(&config.directory)?),
            StorageBackend::Memory => Arc::new(memory::MemoryStore::new()),
        };
        Ok(Self::new(store, config.key_prefix.clone()))
    }

    /// Blob name of a collection
    pub fn key(&self, collection: Collection) -> String {
        format!("{}{}", self.key_prefix, collection.name())
    }

    /// Read a collection. `Ok(None)` when the blob is absent.
    pub fn try_load<T: DeserializeOwned>(&self, collection: Collection) -> AppResult<Option<Vec<T>>> {
        let key = self.key(collection);
        match self.store.get(&key)? {
            Some(raw) => decode(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// Read a collection, falling back when the blob is absent or malformed.
    ///
    /// A validly stored empty collection is returned as is.
    pub fn load<T, F>(&self, collection: Collection, fallback: F) -> Vec<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Vec<T>,
    {
        match self.try_load(collection) {
            Ok(Some(records)) => {
                tracing::debug!(collection = %collection, count = records.len(), "Loaded collection");
                records
            }
            Ok(None) => {
                tracing::debug!(collection = %collection, "No stored blob, using fallback");
                fallback()
            }
            Err(e) => {
                tracing::warn!(
                    collection = %collection,
                    key = %self.key(collection),
                    error = %e,
                    "Error parsing stored collection, using fallback"
                );
                fallback()
            }
        }
    }

    /// Serialize and write a whole collection
    pub fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> AppResult<()> {
        let raw = encode(records)?;
        self.store.put(&self.key(collection), &raw)?;
        tracing::trace!(collection = %collection, count = records.len(), "Saved collection");
        Ok(())
    }
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    version: u64,
    records: &'a [T],
}

fn encode<T: Serialize>(records: &[T]) -> AppResult<String> {
    let envelope = Envelope {
        version: SCHEMA_VERSION,
        records,
    };
    Ok(serde_json::to_string(&envelope)?)
}

fn decode<T: DeserializeOwned>(raw: &str) -> AppResult<Vec<T>> {
    let value: Value = serde_json::from_str(raw)?;
    match value {
        // legacy layout, version 0
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(mut map) => {
            let version = map
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| AppError::Storage("Blob has no schema version".to_string()))?;
            if version > SCHEMA_VERSION {
                return Err(AppError::Storage(format!(
                    "Unsupported schema version {} (max {})",
                    version, SCHEMA_VERSION
                )));
            }
            let records = map
                .remove("records")
                .ok_or_else(|| AppError::Storage("Blob has no records".to_string()))?;
            Ok(serde_json::from_value(records)?)
        }
        _ => Err(AppError::Storage(
            "Blob is neither an array nor a versioned envelope".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{seed, Asset, Notification};
    use memory::MemoryStore;

    fn repository() -> (Arc<MemoryStore>, Repository) {
        let store = Arc::new(MemoryStore::new());
        let repository = Repository::new(store.clone(), "assetum_");
        (store, repository)
    }

    #[test]
    fn test_keys_use_prefix() {
        let (_, repository) = repository();
        assert_eq!(repository.key(Collection::Assets), "assetum_assets");
        assert_eq!(repository.key(Collection::Notifications), "assetum_notifications");
    }

    #[test]
    fn test_round_trip_collection() {
        let (_, repository) = repository();
        let assets = seed::assets();
        repository.save(Collection::Assets, &assets).unwrap();
        let loaded: Vec<Asset> = repository.load(Collection::Assets, Vec::new);
        assert_eq!(loaded, assets);
    }

    #[test]
    fn test_empty_collection_is_not_replaced_by_fallback() {
        let (_, repository) = repository();
        repository.save::<Notification>(Collection::Notifications, &[]).unwrap();
        let loaded: Vec<Notification> = repository.load(Collection::Notifications, seed::notifications);
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_absent_blob_uses_fallback() {
        let (_, repository) = repository();
        let loaded: Vec<Asset> = repository.load(Collection::Assets, seed::assets);
        assert_eq!(loaded.len(), 3);
    }

    #[test]
    fn test_corrupt_blob_uses_fallback() {
        let (store, repository) = repository();
        store.put("assetum_assets", "{not json").unwrap();
        let loaded: Vec<Asset> = repository.load(Collection::Assets, seed::assets);
        assert_eq!(loaded, seed::assets());
        assert!(repository.try_load::<Asset>(Collection::Assets).is_err());
    }

    #[test]
    fn test_legacy_bare_array_is_read() {
        let (store, repository) = repository();
        let legacy = serde_json::to_string(&seed::notifications()).unwrap();
        store.put("assetum_notifications", &legacy).unwrap();
        let loaded: Vec<Notification> = repository.load(Collection::Notifications, Vec::new);
        assert_eq!(loaded, seed::notifications());
    }

    #[test]
    fn test_future_schema_version_is_rejected() {
        let (store, repository) = repository();
        store
            .put("assetum_users", r#"{"version": 99, "records": []}"#)
            .unwrap();
        assert!(matches!(
            repository.try_load::<crate::models::User>(Collection::Users),
            Err(AppError::Storage(_))
        ));
    }

    #[test]
    fn test_saved_blob_carries_version() {
        let (store, repository) = repository();
        repository.save(Collection::Rentals, &seed::rentals()).unwrap();
        let raw = store.get("assetum_rentals").unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], SCHEMA_VERSION);
        assert_eq!(value["records"][0]["id"], "RA-2201");
    }

    #[test]
    fn test_store_read_error_uses_fallback() {
        let mut store = MockKvStore::new();
        store
            .expect_get()
            .returning(|_| Err(AppError::Storage("medium unavailable".to_string())));
        let repository = Repository::new(Arc::new(store), "assetum_");
        let loaded: Vec<Asset> = repository.load(Collection::Assets, seed::assets);
        assert_eq!(loaded.len(), 3);
    }
}
