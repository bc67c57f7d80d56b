use serde::Deserialize;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::todo::store::ToDoStore;

pub type SharedStore = Arc<Mutex<ToDoStore>>;

/// Settings read from Rocket's figment, alongside Rocket's own keys.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_todo_db")]
    pub todo_db: PathBuf,
}

fn default_todo_db() -> PathBuf {
    PathBuf::from("todos.db")
}

impl Default for AppConfig {
    fn default() -> AppConfig {
        AppConfig {
            todo_db: default_todo_db(),
        }
    }
}
