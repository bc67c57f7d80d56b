use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::KeyValueStore;
use crate::internal_error::InternalResult;

/// Clones share one map.
#[derive(Clone, Default)]
pub struct MemoryKeyValueStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> MemoryKeyValueStore {
        MemoryKeyValueStore::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> InternalResult<Option<String>> {
        Ok(self.items.lock()?.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> InternalResult<()> {
        self.items.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
