use reqwest::StatusCode;
use thiserror::Error;

use crate::task::TaskId;

/// Errors that can occur while talking to the todo backend.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("task title must not be blank")]
    BlankTitle,
    #[error("invalid due date: {0}")]
    InvalidDueDate(String),
    #[error("invalid API URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to call {call}: {source}")]
    Request {
        call: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{call} returned {status}")]
    Status { call: String, status: StatusCode },
    #[error("failed to parse {call} response: {source}")]
    Decode {
        call: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("task {0} not found")]
    NotFound(TaskId),
    #[error("{0}")]
    Unknown(String),
}

impl TodoError {
    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }
}
