use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use thiserror::Error;
use tracing::error;

use std::sync::PoisonError;

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lock poisoned: {0}")]
    Poisoned(String),
}

impl<T> From<PoisonError<T>> for InternalError {
    fn from(e: PoisonError<T>) -> InternalError {
        InternalError::Poisoned(e.to_string())
    }
}

impl<'r> Responder<'r, 'static> for InternalError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        error!("{}", self);
        Err(Status::InternalServerError)
    }
}

pub type InternalResult<T> = Result<T, InternalError>;
