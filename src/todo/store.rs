use chrono::Utc;
use tracing::{debug, info, warn};

use super::data::*;
use super::error::{TodoError, TodoResult};
use crate::internal_error::InternalResult;
use crate::storage::KeyValueStore;

#[derive(Debug, Default)]
struct IdClock {
    last: i64,
}

impl IdClock {
    fn seeded_from(todos: &ToDoCollection) -> IdClock {
        IdClock {
            last: todos.keys().filter_map(TodoID::timestamp).max().unwrap_or(0),
        }
    }

    fn next(&mut self) -> TodoID {
        let now = Utc::now().timestamp_millis();
        self.last = match self.last.checked_add(1) {
            Some(bumped) => now.max(bumped),
            None => now,
        };
        TodoID::new(self.last.to_string())
    }
}

/// A failed write leaves the in-memory change in place and is reported as
/// [`WriteStatus::Unavailable`].
pub struct ToDoStore {
    storage: Box<dyn KeyValueStore + Send>,
    todos: ToDoCollection,
    mode: Mode,
    ids: IdClock,
}

impl ToDoStore {
    /// Reads `@toDos` and `@location`. Missing or unreadable values fall back
    /// to an empty collection and `Mode::Work`; this never fails.
    pub fn load(storage: Box<dyn KeyValueStore + Send>) -> ToDoStore {
        let todos = load_collection(storage.as_ref());
        let mode = load_mode(storage.as_ref());
        info!("loaded {} todos, mode {}", todos.len(), mode);

        ToDoStore {
            storage,
            ids: IdClock::seeded_from(&todos),
            todos,
            mode,
        }
    }

    pub fn todos(&self) -> &ToDoCollection {
        &self.todos
    }

    pub fn get(&self, id: &TodoID) -> Option<&ToDoRecord> {
        self.todos.get(id)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) -> WriteStatus {
        self.mode = mode;
        debug!("mode set to {}", mode);
        write_status(STORAGE_LOCATION, self.save_mode())
    }

    pub fn add(
        &mut self,
        text: &str,
        category: Mode,
    ) -> TodoResult<Committed<(TodoID, ToDoRecord)>> {
        if text.is_empty() {
            return Err(TodoError::Rejected("todo text is empty".to_string()));
        }

        let mut id = self.ids.next();
        while self.todos.contains_key(&id) {
            id = self.ids.next();
        }
        let record = ToDoRecord {
            text: text.to_string(),
            category,
            completed: false,
        };
        self.todos.insert(id.clone(), record.clone());
        debug!("added todo {} in {}", id, category);

        Ok(self.commit((id, record)))
    }

    pub fn toggle_complete(&mut self, id: &TodoID) -> TodoResult<Committed<ToDoRecord>> {
        let record = self.record_mut(id)?;
        record.completed = !record.completed;
        let record = record.clone();
        debug!("todo {} completed = {}", id, record.completed);

        Ok(self.commit(record))
    }

    /// Replaces the text of a record. Unlike [`ToDoStore::add`], empty text
    /// is accepted.
    pub fn edit_text(
        &mut self,
        id: &TodoID,
        new_text: &str,
    ) -> TodoResult<Committed<ToDoRecord>> {
        let record = self.record_mut(id)?;
        record.text = new_text.to_string();
        let record = record.clone();
        debug!("edited todo {}", id);

        Ok(self.commit(record))
    }

    pub fn delete(&mut self, id: &TodoID) -> TodoResult<Committed<()>> {
        if self.todos.remove(id).is_none() {
            return Err(TodoError::NotFound(id.clone()));
        }
        debug!("deleted todo {}", id);

        Ok(self.commit(()))
    }

    pub fn progress(&self, mode: Mode) -> Progress {
        let (completed, total) = self
            .in_mode(mode)
            .fold((0, 0), |(completed, total), (_, record)| {
                (completed + record.completed as usize, total + 1)
            });

        Progress::from_counts(completed, total)
    }

    /// Records of `mode`, pending ones first, each group in id order
    /// (numeric ids by value).
    pub fn view(&self, mode: Mode) -> ModeView {
        let (completed, pending): (Vec<TodoEntry>, Vec<TodoEntry>) = self
            .in_mode(mode)
            .map(|(id, record)| TodoEntry::new(id, record))
            .partition(|entry| entry.completed);

        ModeView {
            mode,
            placeholder: mode.placeholder().to_string(),
            progress: self.progress(mode).percent(),
            pending,
            completed,
        }
    }

    fn in_mode(&self, mode: Mode) -> impl Iterator<Item = (&TodoID, &ToDoRecord)> {
        self.todos
            .iter()
            .filter(move |(_, record)| record.category == mode)
    }

    fn record_mut(&mut self, id: &TodoID) -> TodoResult<&mut ToDoRecord> {
        self.todos
            .get_mut(id)
            .ok_or_else(|| TodoError::NotFound(id.clone()))
    }

    fn commit<T>(&mut self, value: T) -> Committed<T> {
        let write = write_status(STORAGE_TODOS, self.save_todos());
        Committed { value, write }
    }

    fn save_mode(&mut self) -> InternalResult<()> {
        let serialized = serde_json::to_string(&self.mode.is_work())?;
        self.storage.set_item(STORAGE_LOCATION, &serialized)
    }

    fn save_todos(&mut self) -> InternalResult<()> {
        let serialized = serde_json::to_string(&self.todos)?;
        self.storage.set_item(STORAGE_TODOS, &serialized)
    }
}

fn write_status(key: &str, result: InternalResult<()>) -> WriteStatus {
    match result {
        Ok(()) => WriteStatus::Persisted,
        Err(e) => {
            warn!("could not persist {}: {}", key, e);
            WriteStatus::Unavailable(e.to_string())
        }
    }
}

fn load_collection(storage: &dyn KeyValueStore) -> ToDoCollection {
    let stored = match storage.get_item(STORAGE_TODOS) {
        Ok(Some(s)) => s,
        Ok(None) => return ToDoCollection::new(),
        Err(e) => {
            warn!("could not read {}: {}", STORAGE_TODOS, e);
            return ToDoCollection::new();
        }
    };

    match serde_json::from_str(&stored) {
        Ok(todos) => todos,
        Err(e) => {
            warn!("discarding unparseable {}: {}", STORAGE_TODOS, e);
            ToDoCollection::new()
        }
    }
}

fn load_mode(storage: &dyn KeyValueStore) -> Mode {
    match storage.get_item(STORAGE_LOCATION) {
        Ok(Some(s)) => match serde_json::from_str::<bool>(&s) {
            Ok(working) => Mode::from_working(working),
            Err(e) => {
                warn!("discarding unparseable {}: {}", STORAGE_LOCATION, e);
                Mode::default()
            }
        },
        Ok(None) => Mode::default(),
        Err(e) => {
            warn!("could not read {}: {}", STORAGE_LOCATION, e);
            Mode::default()
        }
    }
}
