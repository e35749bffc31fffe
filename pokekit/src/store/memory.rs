use crate::store::{self, Backend, Collection};
use crate::{Error, Result};

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// An in-process store.
///
/// Clones share the same collections. Items created without an `id` get the
/// next free one, like json-server does.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    collections: BTreeMap<Collection, Vec<Value>>,
    offline: bool,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following operation fail as if the store was unreachable.
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.offline = offline;
        }
    }

    pub fn len(&self, collection: Collection) -> usize {
        self.state
            .lock()
            .map(|state| state.collections.get(&collection).map_or(0, Vec::len))
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        let state = self
            .state
            .lock()
            .map_err(|_| Error::PersistenceUnavailable("memory store is poisoned".into()))?;

        if state.offline {
            return Err(Error::PersistenceUnavailable(
                "memory store is offline".into(),
            ));
        }

        Ok(state)
    }
}

#[async_trait]
impl Backend for Memory {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>> {
        let state = self.lock()?;

        Ok(state
            .collections
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn create(&self, collection: Collection, mut item: Value) -> Result<Value> {
        let mut state = self.lock()?;
        let items = state.collections.entry(collection).or_default();

        let Some(fields) = item.as_object_mut() else {
            return Err(Error::MalformedItem {
                collection,
                reason: "item is not an object".into(),
            });
        };

        match fields.get("id").and_then(Value::as_u64) {
            Some(id) => {
                let id = u32::try_from(id).map_err(|_| Error::MalformedItem {
                    collection,
                    reason: format!("id {id} is out of range").into(),
                })?;

                if items.iter().any(|item| store::item_id(item) == Some(id)) {
                    return Err(Error::DuplicateItem { collection, id });
                }
            }
            None => {
                let last = items.iter().filter_map(store::item_id).max().unwrap_or(0);

                let next = last.checked_add(1).ok_or_else(|| Error::MalformedItem {
                    collection,
                    reason: format!("no id left after {last}").into(),
                })?;

                let _ = fields.insert("id".to_owned(), Value::from(next));
            }
        }

        items.push(item.clone());

        Ok(item)
    }

    async fn delete(&self, collection: Collection, id: u32) -> Result<()> {
        let mut state = self.lock()?;
        let items = state.collections.entry(collection).or_default();

        let Some(position) = items
            .iter()
            .position(|item| store::item_id(item) == Some(id))
        else {
            return Err(Error::MissingItem { collection, id });
        };

        let _ = items.remove(position);

        Ok(())
    }
}
