use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{Result, TodoApi};
use crate::error::TodoError;
use crate::task::{Task, TaskId};

/// In-process backend holding tasks in memory.
///
/// Backs `todo-tui dev` and doubles as a test double: every call is counted
/// and the next call can be made to fail.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoApi {
    tasks: Arc<Mutex<Vec<Task>>>,
    call_count: Arc<AtomicUsize>,
    fail_next: Arc<AtomicBool>,
}

impl InMemoryTodoApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Arc::new(Mutex::new(tasks)),
            ..Self::default()
        }
    }

    /// Number of API calls made so far, including failed ones.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Make the next call fail without touching the stored tasks.
    pub fn fail_next_call(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Current backend-side contents.
    pub fn stored(&self) -> Vec<Task> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Task>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_call(&self, call: &str) -> Result<()> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(TodoError::unknown(format!("{call} failed (injected)")));
        }
        Ok(())
    }

    fn next_id(tasks: &[Task]) -> TaskId {
        let max = tasks
            .iter()
            .filter_map(|task| match task.id {
                TaskId::Number(n) => Some(n),
                TaskId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);
        TaskId::Number(max + 1)
    }
}

#[async_trait]
impl TodoApi for InMemoryTodoApi {
    async fn list(&self) -> Result<Vec<Task>> {
        self.begin_call("GET /todos")?;
        Ok(self.lock().clone())
    }

    async fn create(&self, title: &str, due_date: Option<&str>) -> Result<Task> {
        self.begin_call("POST /todos")?;
        let mut tasks = self.lock();
        let task = Task {
            id: Self::next_id(&tasks),
            title: title.to_string(),
            completed: false,
            due_date: due_date.map(str::to_string),
        };
        tasks.insert(0, task.clone());
        Ok(task)
    }

    async fn set_completed(&self, id: &TaskId, completed: bool) -> Result<()> {
        self.begin_call("PUT /todos/:id")?;
        let mut tasks = self.lock();
        let task = tasks
            .iter_mut()
            .find(|task| &task.id == id)
            .ok_or_else(|| TodoError::NotFound(id.clone()))?;
        task.completed = completed;
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> Result<()> {
        self.begin_call("DELETE /todos/:id")?;
        let mut tasks = self.lock();
        let before = tasks.len();
        tasks.retain(|task| &task.id != id);
        if tasks.len() == before {
            return Err(TodoError::NotFound(id.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, title: &str) -> Task {
        Task {
            id: id.into(),
            title: title.to_string(),
            completed: false,
            due_date: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_next_numeric_id() {
        let api = InMemoryTodoApi::with_tasks(vec![task(4, "A"), task(9, "B")]);

        let created = api.create("C", Some("2025-01-01T10:00")).await.unwrap();

        assert_eq!(created.id, TaskId::Number(10));
        assert_eq!(created.due_date.as_deref(), Some("2025-01-01T10:00"));
        assert_eq!(api.stored()[0], created);
    }

    #[tokio::test]
    async fn injected_failure_only_affects_one_call() {
        let api = InMemoryTodoApi::with_tasks(vec![task(1, "A")]);
        api.fail_next_call();

        assert!(api.delete(&TaskId::Number(1)).await.is_err());
        assert_eq!(api.stored().len(), 1);

        api.delete(&TaskId::Number(1)).await.unwrap();
        assert!(api.stored().is_empty());
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let api = InMemoryTodoApi::new();
        let err = api.set_completed(&TaskId::Number(3), true).await.unwrap_err();
        assert!(matches!(err, TodoError::NotFound(TaskId::Number(3))));
    }
}
