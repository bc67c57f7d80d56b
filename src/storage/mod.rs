mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

use crate::internal_error::InternalResult;

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> InternalResult<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> InternalResult<()>;
}
