use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use super::dto::{CreateTaskRequest, UpdateTaskRequest};
use super::{Result, TodoApi};
use crate::error::TodoError;
use crate::task::{Task, TaskId};

/// [`TodoApi`] over the backend's REST interface.
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    client: Client,
    base_url: Url,
}

impl HttpTodoApi {
    /// Create a client rooted at `base_url`. A path prefix such as
    /// `http://host/api` is kept, so requests go to `http://host/api/todos`.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim()).map_err(|source| TodoError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TodoError::InvalidUrl {
                url: base_url.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            });
        }

        let client = Client::builder().build().map_err(TodoError::Client)?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TodoError::unknown(format!("cannot build URL from {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, call: &str) -> Result<Response> {
        let response = request.send().await.map_err(|source| TodoError::Request {
            call: call.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TodoError::Status {
                call: call.to_string(),
                status,
            });
        }

        tracing::debug!(call, %status, "backend call succeeded");
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder, call: &str) -> Result<T> {
        let response = self.send(request, call).await?;
        response.json::<T>().await.map_err(|source| TodoError::Decode {
            call: call.to_string(),
            source,
        })
    }

    async fn send_without_body(&self, request: RequestBuilder, call: &str) -> Result<()> {
        let response = self.send(request, call).await?;
        if let Err(e) = response.bytes().await {
            tracing::debug!(call, error = %e, "failed to read response body");
        }
        Ok(())
    }
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn list(&self) -> Result<Vec<Task>> {
        self.get_json(self.client.get(self.endpoint(&["todos"])?), "GET /todos")
            .await
    }

    async fn create(&self, title: &str, due_date: Option<&str>) -> Result<Task> {
        self.get_json(
            self.client
                .post(self.endpoint(&["todos"])?)
                .json(&CreateTaskRequest { title, due_date }),
            "POST /todos",
        )
        .await
    }

    async fn set_completed(&self, id: &TaskId, completed: bool) -> Result<()> {
        let id = id.to_string();
        self.send_without_body(
            self.client
                .put(self.endpoint(&["todos", &id])?)
                .json(&UpdateTaskRequest { completed }),
            "PUT /todos/:id",
        )
        .await
    }

    async fn delete(&self, id: &TaskId) -> Result<()> {
        let id = id.to_string();
        self.send_without_body(
            self.client.delete(self.endpoint(&["todos", &id])?),
            "DELETE /todos/:id",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_path_prefix() {
        let api = HttpTodoApi::new("http://localhost:3001/api/").unwrap();
        let url = api.endpoint(&["todos", "42"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/api/todos/42");
    }

    #[test]
    fn endpoint_on_bare_host() {
        let api = HttpTodoApi::new("http://localhost:3001").unwrap();
        let url = api.endpoint(&["todos"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/todos");
    }

    #[test]
    fn ids_are_percent_encoded() {
        let api = HttpTodoApi::new("http://localhost:3001").unwrap();
        let url = api.endpoint(&["todos", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/todos/a%2Fb%20c");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            HttpTodoApi::new("not a url"),
            Err(TodoError::InvalidUrl { .. })
        ));
        assert!(matches!(
            HttpTodoApi::new("mailto:someone@example.com"),
            Err(TodoError::InvalidUrl { .. })
        ));
    }
}
