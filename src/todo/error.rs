use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use serde::Serialize;
use thiserror::Error;

use super::data::TodoID;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TodoError {
    #[error("rejected: {0}")]
    Rejected(String),

    #[error("no todo with id {0}")]
    NotFound(TodoID),
}

pub type TodoResult<T> = Result<T, TodoError>;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl<'r> Responder<'r, 'static> for TodoError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = match self {
            TodoError::Rejected(_) => Status::BadRequest,
            TodoError::NotFound(_) => Status::NotFound,
        };

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .respond_to(request)
    }
}
