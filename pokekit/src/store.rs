//! Generic CRUD over the collections of the persistence store.
pub mod json_server;
pub mod memory;

pub use json_server::JsonServer;
pub use memory::Memory;

use crate::Result;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    Team,
    Battles,
    Favorites,
}

impl Collection {
    pub fn path(self) -> &'static str {
        match self {
            Collection::Team => "team",
            Collection::Battles => "battles",
            Collection::Favorites => "favorites",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A place where collections of JSON items addressed by an integer `id` live.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Every item of the collection, in insertion order.
    async fn list(&self, collection: Collection) -> Result<Vec<Value>>;
    /// Inserts an item and returns it as stored.
    async fn create(&self, collection: Collection, item: Value) -> Result<Value>;
    /// Deletes the item with the given id.
    async fn delete(&self, collection: Collection, id: u32) -> Result<()>;
}

/// An entity that is persisted in one of the store collections.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;
}

/// A cheap, cloneable handle to a [`Backend`].
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn Backend>,
}

impl Store {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn json_server(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self::new(JsonServer::new(base_url, timeout))
    }

    pub async fn list<T: Resource>(&self) -> Result<Vec<T>> {
        self.backend
            .list(T::COLLECTION)
            .await?
            .into_iter()
            .map(decode::<T>)
            .collect()
    }

    pub async fn create<T: Resource>(&self, item: &T) -> Result<T> {
        let item = serde_json::to_value(item).map_err(malformed(T::COLLECTION))?;
        let stored = self.backend.create(T::COLLECTION, item).await?;

        decode(stored)
    }

    pub async fn delete<T: Resource>(&self, id: u32) -> Result<()> {
        self.backend.delete(T::COLLECTION, id).await
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

fn decode<T: Resource>(item: Value) -> Result<T> {
    serde_json::from_value(item).map_err(malformed(T::COLLECTION))
}

fn malformed(collection: Collection) -> impl Fn(serde_json::Error) -> crate::Error {
    move |error| crate::Error::MalformedItem {
        collection,
        reason: error.to_string().into(),
    }
}

/// The `id` of a stored item, if it has a valid one.
pub(crate) fn item_id(item: &Value) -> Option<u32> {
    item.get("id")?.as_u64()?.try_into().ok()
}
