use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use std::path::Path;

use super::KeyValueStore;
use crate::internal_error::InternalResult;

pub struct SqliteKeyValueStore {
    connection: Connection,
}

impl SqliteKeyValueStore {
    pub fn open(path: impl AsRef<Path>) -> InternalResult<SqliteKeyValueStore> {
        debug!("opening key-value store at {}", path.as_ref().display());
        SqliteKeyValueStore::from_connection(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> InternalResult<SqliteKeyValueStore> {
        SqliteKeyValueStore::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> InternalResult<SqliteKeyValueStore> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS key_value (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            params![],
        )?;

        Ok(SqliteKeyValueStore { connection })
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get_item(&self, key: &str) -> InternalResult<Option<String>> {
        let value = self
            .connection
            .query_row(
                "SELECT value FROM key_value WHERE key = (?1)",
                params![key],
                |row| row.get::<usize, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> InternalResult<()> {
        self.connection.execute(
            "INSERT INTO key_value VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_none() {
        let store = SqliteKeyValueStore::open_in_memory().unwrap();
        assert_eq!(store.get_item("@toDos").unwrap(), None);
    }

    #[test]
    fn set_item_overwrites() {
        let mut store = SqliteKeyValueStore::open_in_memory().unwrap();
        store.set_item("@location", "true").unwrap();
        store.set_item("@location", "false").unwrap();

        assert_eq!(
            store.get_item("@location").unwrap().as_deref(),
            Some("false")
        );
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");

        {
            let mut store = SqliteKeyValueStore::open(&path).unwrap();
            store.set_item("@toDos", "{}").unwrap();
        }

        let store = SqliteKeyValueStore::open(&path).unwrap();
        assert_eq!(store.get_item("@toDos").unwrap().as_deref(), Some("{}"));
    }
}
