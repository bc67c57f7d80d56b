//! A two-mode ("work" and "travel") to-do list backed by a key-value store,
//! served as a small JSON API.

pub mod data;
pub mod internal_error;
pub mod storage;
pub mod todo;

use rocket::{routes, Build, Rocket};

use std::sync::{Arc, Mutex};

use data::SharedStore;
use todo::endpoints;
use todo::store::ToDoStore;

pub fn build_rocket(store: ToDoStore) -> Rocket<Build> {
    let store: SharedStore = Arc::new(Mutex::new(store));

    rocket::build().manage(store).mount(
        "/api",
        routes![
            endpoints::get_todos,
            endpoints::get_mode,
            endpoints::set_mode,
            endpoints::get_progress,
            endpoints::add_todo,
            endpoints::toggle_todo,
            endpoints::edit_todo,
            endpoints::delete_todo,
        ],
    )
}
