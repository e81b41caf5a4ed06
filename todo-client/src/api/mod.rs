//! Port to the todo backend and its adapters.

use async_trait::async_trait;

use crate::error::TodoError;
use crate::task::{Task, TaskId};

mod dto;
mod http;
mod memory;

pub use http::HttpTodoApi;
pub use memory::InMemoryTodoApi;

pub type Result<T> = std::result::Result<T, TodoError>;

/// CRUD operations the backend exposes for task records.
#[async_trait]
pub trait TodoApi: Send + Sync {
    /// `GET /todos`
    async fn list(&self) -> Result<Vec<Task>>;

    /// `POST /todos`, returning the canonical record the backend stored.
    async fn create(&self, title: &str, due_date: Option<&str>) -> Result<Task>;

    /// `PUT /todos/{id}` with the new completion flag.
    async fn set_completed(&self, id: &TaskId, completed: bool) -> Result<()>;

    /// `DELETE /todos/{id}`
    async fn delete(&self, id: &TaskId) -> Result<()>;
}
