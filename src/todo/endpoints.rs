use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::{get, post, State};

use std::sync::PoisonError;

use crate::data::SharedStore;
use crate::internal_error::InternalError;

use super::data::*;
use super::error::TodoError;

pub enum ApiError {
    Todo(TodoError),
    Internal(InternalError),
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        match self {
            ApiError::Todo(e) => e.respond_to(request),
            ApiError::Internal(e) => e.respond_to(request),
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(e: TodoError) -> ApiError {
        ApiError::Todo(e)
    }
}

impl From<InternalError> for ApiError {
    fn from(e: InternalError) -> ApiError {
        ApiError::Internal(e)
    }
}

impl<T> From<PoisonError<T>> for ApiError {
    fn from(e: PoisonError<T>) -> ApiError {
        ApiError::Internal(e.into())
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

#[get("/get_todos")]
pub fn get_todos(store: &State<SharedStore>) -> ApiResult<ModeView> {
    let store = store.lock()?;

    Ok(Json(store.view(store.mode())))
}

#[get("/get_mode")]
pub fn get_mode(store: &State<SharedStore>) -> ApiResult<ModeResponse> {
    let mode = store.lock()?.mode();

    Ok(Json(ModeResponse {
        mode,
        placeholder: mode.placeholder().to_string(),
    }))
}

#[post("/set_mode", format = "json", data = "<request>")]
pub fn set_mode(
    request: Json<SetModeRequest>,
    store: &State<SharedStore>,
) -> ApiResult<MutationResponse> {
    let mut store = store.lock()?;
    let write = store.set_mode(request.mode);

    Ok(Json(MutationResponse {
        todo: None,
        persisted: write.is_persisted(),
    }))
}

#[get("/progress")]
pub fn get_progress(store: &State<SharedStore>) -> ApiResult<ProgressResponse> {
    let store = store.lock()?;
    let mode = store.mode();

    Ok(Json(ProgressResponse {
        mode,
        percent: store.progress(mode).percent(),
    }))
}

#[post("/add_todo", format = "json", data = "<request>")]
pub fn add_todo(
    request: Json<AddTodoRequest>,
    store: &State<SharedStore>,
) -> ApiResult<MutationResponse> {
    let mut store = store.lock()?;
    let mode = store.mode();
    let committed = store.add(&request.text, mode)?;
    let (id, record) = &committed.value;

    Ok(Json(MutationResponse {
        todo: Some(TodoEntry::new(id, record)),
        persisted: committed.write.is_persisted(),
    }))
}

#[post("/toggle_todo", format = "json", data = "<request>")]
pub fn toggle_todo(
    request: Json<TodoIDRequest>,
    store: &State<SharedStore>,
) -> ApiResult<MutationResponse> {
    let mut store = store.lock()?;
    let committed = store.toggle_complete(&request.id)?;

    Ok(Json(MutationResponse {
        todo: Some(TodoEntry::new(&request.id, &committed.value)),
        persisted: committed.write.is_persisted(),
    }))
}

#[post("/edit_todo", format = "json", data = "<request>")]
pub fn edit_todo(
    request: Json<EditTodoRequest>,
    store: &State<SharedStore>,
) -> ApiResult<MutationResponse> {
    let mut store = store.lock()?;
    let committed = store.edit_text(&request.id, &request.text)?;

    Ok(Json(MutationResponse {
        todo: Some(TodoEntry::new(&request.id, &committed.value)),
        persisted: committed.write.is_persisted(),
    }))
}

#[post("/delete_todo", format = "json", data = "<request>")]
pub fn delete_todo(
    request: Json<TodoIDRequest>,
    store: &State<SharedStore>,
) -> ApiResult<MutationResponse> {
    let mut store = store.lock()?;
    let committed = store.delete(&request.id)?;

    Ok(Json(MutationResponse {
        todo: None,
        persisted: committed.write.is_persisted(),
    }))
}
