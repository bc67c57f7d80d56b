use serde::{Deserialize, Serialize};

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

pub const STORAGE_TODOS: &str = "@toDos";
pub const STORAGE_LOCATION: &str = "@location";

/// Numeric ids order by value, ahead of any non-numeric ids read from storage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TodoID(String);

impl TodoID {
    pub fn new(id: impl Into<String>) -> TodoID {
        TodoID(id.into())
    }

    pub(crate) fn timestamp(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl Ord for TodoID {
    fn cmp(&self, other: &TodoID) -> Ordering {
        match (self.timestamp(), other.timestamp()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for TodoID {
    fn partial_cmp(&self, other: &TodoID) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TodoID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Work,
    Travel,
}

impl Mode {
    /// Storage encodes the mode as a single `working` flag.
    pub fn from_working(working: bool) -> Mode {
        if working {
            Mode::Work
        } else {
            Mode::Travel
        }
    }

    pub fn is_work(self) -> bool {
        self == Mode::Work
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Mode::Work => "What do you have to do?",
            Mode::Travel => "What do you want to do?",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Work => f.write_str("work"),
            Mode::Travel => f.write_str("travel"),
        }
    }
}

mod working_flag {
    use super::Mode;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(mode: &Mode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(mode.is_work())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Mode, D::Error> {
        bool::deserialize(deserializer).map(Mode::from_working)
    }
}

/// One to-do as it is persisted under `@toDos`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ToDoRecord {
    pub text: String,
    #[serde(rename = "working", with = "working_flag")]
    pub category: Mode,
    pub completed: bool,
}

pub type ToDoCollection = BTreeMap<TodoID, ToDoRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// No records exist in the mode, so there is nothing to divide by.
    NoRecords,
    Percent(u8),
}

impl Progress {
    pub fn from_counts(completed: usize, total: usize) -> Progress {
        if total == 0 {
            return Progress::NoRecords;
        }

        // round(100 * completed / total), halves rounding up
        let percent = (200 * completed + total) / (2 * total);
        Progress::Percent(percent.min(100) as u8)
    }

    pub fn percent(self) -> Option<u8> {
        match self {
            Progress::NoRecords => None,
            Progress::Percent(p) => Some(p),
        }
    }
}

/// Outcome of the durable write that follows every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteStatus {
    Persisted,
    Unavailable(String),
}

impl WriteStatus {
    pub fn is_persisted(&self) -> bool {
        matches!(self, WriteStatus::Persisted)
    }
}

/// A mutation that has taken effect in memory, with the fate of its write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed<T> {
    pub value: T,
    pub write: WriteStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TodoEntry {
    pub id: TodoID,
    pub text: String,
    pub category: Mode,
    pub completed: bool,
}

impl TodoEntry {
    pub fn new(id: &TodoID, record: &ToDoRecord) -> TodoEntry {
        TodoEntry {
            id: id.clone(),
            text: record.text.clone(),
            category: record.category,
            completed: record.completed,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ModeView {
    pub mode: Mode,
    pub placeholder: String,
    pub progress: Option<u8>,
    pub pending: Vec<TodoEntry>,
    pub completed: Vec<TodoEntry>,
}

#[derive(Deserialize, Debug)]
pub struct AddTodoRequest {
    pub text: String,
}

#[derive(Deserialize, Debug)]
pub struct TodoIDRequest {
    pub id: TodoID,
}

#[derive(Deserialize, Debug)]
pub struct EditTodoRequest {
    pub id: TodoID,
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SetModeRequest {
    pub mode: Mode,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ModeResponse {
    pub mode: Mode,
    pub placeholder: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ProgressResponse {
    pub mode: Mode,
    pub percent: Option<u8>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MutationResponse {
    pub todo: Option<TodoEntry>,
    pub persisted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_working_flag() {
        let record = ToDoRecord {
            text: "Pack bags".to_string(),
            category: Mode::Travel,
            completed: true,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "text": "Pack bags", "working": false, "completed": true })
        );
    }

    #[test]
    fn collection_parses_legacy_layout() {
        let stored = r#"{"1633000000000":{"text":"Email boss","working":true,"completed":false}}"#;
        let todos: ToDoCollection = serde_json::from_str(stored).unwrap();

        let record = &todos[&TodoID::new("1633000000000")];
        assert_eq!(record.text, "Email boss");
        assert_eq!(record.category, Mode::Work);
        assert!(!record.completed);
    }

    #[test]
    fn progress_rounds_to_nearest() {
        assert_eq!(Progress::from_counts(1, 3), Progress::Percent(33));
        assert_eq!(Progress::from_counts(2, 3), Progress::Percent(67));
        assert_eq!(Progress::from_counts(1, 8), Progress::Percent(13));
        assert_eq!(Progress::from_counts(4, 4), Progress::Percent(100));
        assert_eq!(Progress::from_counts(0, 5), Progress::Percent(0));
    }

    #[test]
    fn empty_mode_has_no_progress() {
        let progress = Progress::from_counts(0, 0);
        assert_eq!(progress, Progress::NoRecords);
        assert_eq!(progress.percent(), None);
    }

    #[test]
    fn ids_order_by_number_then_text() {
        let mut ids = vec![
            TodoID::new("legacy"),
            TodoID::new("1000"),
            TodoID::new("999"),
            TodoID::new("abc"),
        ];
        ids.sort();

        assert_eq!(
            ids,
            vec![
                TodoID::new("999"),
                TodoID::new("1000"),
                TodoID::new("abc"),
                TodoID::new("legacy"),
            ]
        );
    }

    #[test]
    fn placeholders_differ_by_mode() {
        assert_eq!(Mode::Work.placeholder(), "What do you have to do?");
        assert_eq!(Mode::Travel.placeholder(), "What do you want to do?");
    }
}
