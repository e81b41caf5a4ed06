//! Client-side copy of the task list, kept in step with the backend.

use std::sync::Arc;

use time::UtcOffset;
use tracing::{error, info, warn};

use crate::api::{Result, TodoApi};
use crate::error::TodoError;
use crate::grouping::{group_by_due_date, TaskGroup};
use crate::notify::Permission;
use crate::reminder::{Reminder, ReminderScheduler};
use crate::task::{Task, TaskId};

/// Canonical in-memory task list.
///
/// The list only changes after the backend confirms a call; every change
/// re-arms the reminder scheduler with a fresh snapshot. Failed calls are
/// logged and leave the list as it was.
pub struct TaskStore {
    api: Arc<dyn TodoApi>,
    tasks: Vec<Task>,
    scheduler: ReminderScheduler,
}

impl TaskStore {
    pub fn new(api: Arc<dyn TodoApi>, scheduler: ReminderScheduler) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            scheduler,
        }
    }

    /// Tasks in store order: newest first, or server order after a refresh.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn grouped(&self, local: UtcOffset) -> Vec<TaskGroup<'_>> {
        group_by_due_date(&self.tasks, local)
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    fn snapshot(&self) -> Arc<[Task]> {
        self.tasks.clone().into()
    }

    fn rearm(&mut self) {
        let snapshot = self.snapshot();
        self.scheduler.rearm(snapshot);
    }

    /// Replace the list with the backend's.
    pub async fn refresh(&mut self) -> Result<()> {
        match self.api.list().await {
            Ok(tasks) => {
                info!(count = tasks.len(), "Loaded tasks");
                self.tasks = tasks;
                self.rearm();
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to load tasks");
                Err(e)
            }
        }
    }

    /// Create a task and put the backend's record at the front of the list.
    ///
    /// A blank title is rejected before any call is made. A blank due date
    /// is sent as no due date.
    pub async fn create(&mut self, title: &str, due_date: Option<&str>) -> Result<&Task> {
        if title.trim().is_empty() {
            warn!("Refusing to create a task with a blank title");
            return Err(TodoError::BlankTitle);
        }
        let due_date = due_date.map(str::trim).filter(|due| !due.is_empty());

        match self.api.create(title, due_date).await {
            Ok(task) => {
                info!(task_id = %task.id, "Created task");
                self.tasks.insert(0, task);
                self.rearm();
                Ok(&self.tasks[0])
            }
            Err(e) => {
                error!(error = %e, "Failed to create task");
                Err(e)
            }
        }
    }

    /// Toggle completion. `current` is the task's completion status as the
    /// caller sees it; the backend is sent its negation.
    pub async fn set_completed(&mut self, id: &TaskId, current: bool) -> Result<()> {
        if let Err(e) = self.api.set_completed(id, !current).await {
            error!(task_id = %id, error = %e, "Failed to update task");
            return Err(e);
        }

        if let Some(task) = self.tasks.iter_mut().find(|task| &task.id == id) {
            task.completed = !task.completed;
            info!(task_id = %id, completed = task.completed, "Updated task");
        }
        self.rearm();
        Ok(())
    }

    pub async fn remove(&mut self, id: &TaskId) -> Result<()> {
        if let Err(e) = self.api.delete(id).await {
            error!(task_id = %id, error = %e, "Failed to delete task");
            return Err(e);
        }

        self.tasks.retain(|task| &task.id != id);
        info!(task_id = %id, "Deleted task");
        self.rearm();
        Ok(())
    }

    /// Ask the notification sink for permission. When granted, reminders are
    /// checked right away instead of waiting for the next period.
    pub fn request_notifications(&mut self) -> (Permission, Vec<Reminder>) {
        let permission = self.scheduler.sink().request_permission();
        match permission {
            Permission::Granted => {
                info!("Notification permission granted");
                let snapshot = self.snapshot();
                let fired = self.scheduler.rearm_and_check(snapshot);
                (permission, fired)
            }
            Permission::Denied => {
                info!("Notification permission denied");
                (permission, Vec::new())
            }
            Permission::Default => {
                info!("Notification permission request dismissed");
                (permission, Vec::new())
            }
        }
    }

    /// Stop background work. Call on teardown.
    pub fn shutdown(&mut self) {
        self.scheduler.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryTodoApi;
    use crate::notify::testing::RecordingSink;
    use crate::reminder::ReminderSettings;

    fn task(id: i64, title: &str, completed: bool, due_date: Option<&str>) -> Task {
        Task {
            id: id.into(),
            title: title.to_string(),
            completed,
            due_date: due_date.map(str::to_string),
        }
    }

    fn store_with(tasks: Vec<Task>) -> (TaskStore, InMemoryTodoApi, Arc<RecordingSink>) {
        let api = InMemoryTodoApi::with_tasks(tasks);
        let sink = Arc::new(RecordingSink::default());
        let scheduler = ReminderScheduler::new(sink.clone(), ReminderSettings::default());
        let store = TaskStore::new(Arc::new(api.clone()), scheduler);
        (store, api, sink)
    }

    #[tokio::test]
    async fn refresh_replaces_the_list_and_arms_the_scheduler() {
        let (mut store, _api, _sink) = store_with(vec![task(1, "A", false, None)]);
        assert!(!store.scheduler().is_armed());

        store.refresh().await.unwrap();

        assert_eq!(store.tasks().len(), 1);
        assert!(store.scheduler().is_armed());
    }

    #[tokio::test]
    async fn refresh_failure_keeps_previous_state() {
        let (mut store, api, _sink) = store_with(vec![task(1, "A", false, None)]);
        store.refresh().await.unwrap();
        api.create("B", None).await.unwrap();

        api.fail_next_call();
        assert!(store.refresh().await.is_err());

        assert_eq!(store.tasks(), &[task(1, "A", false, None)]);
    }

    #[tokio::test]
    async fn whitespace_title_makes_no_call() {
        let (mut store, api, _sink) = store_with(vec![task(1, "A", false, None)]);
        store.refresh().await.unwrap();
        let calls = api.call_count();

        let err = store.create("   ", Some("2025-01-01T10:00")).await.unwrap_err();

        assert!(matches!(err, TodoError::BlankTitle));
        assert_eq!(api.call_count(), calls);
        assert_eq!(store.tasks().len(), 1);
    }

    #[tokio::test]
    async fn create_prepends_the_server_record() {
        let (mut store, _api, _sink) = store_with(vec![task(1, "A", false, None)]);
        store.refresh().await.unwrap();

        let created = store
            .create("B", Some("2025-01-01T10:00"))
            .await
            .unwrap()
            .clone();

        assert_eq!(created, task(2, "B", false, Some("2025-01-01T10:00")));
        assert_eq!(
            store.tasks(),
            &[
                task(2, "B", false, Some("2025-01-01T10:00")),
                task(1, "A", false, None)
            ]
        );
    }

    #[tokio::test]
    async fn blank_due_date_is_sent_as_none() {
        let (mut store, api, _sink) = store_with(Vec::new());

        store.create("A", Some("  ")).await.unwrap();

        assert_eq!(api.stored()[0].due_date, None);
    }

    #[tokio::test]
    async fn set_completed_sends_the_negation_and_flips_locally() {
        let (mut store, api, _sink) = store_with(vec![task(1, "A", false, None)]);
        store.refresh().await.unwrap();

        store.set_completed(&TaskId::Number(1), false).await.unwrap();

        assert!(api.stored()[0].completed);
        assert!(store.tasks()[0].completed);
    }

    #[tokio::test]
    async fn failed_update_leaves_the_flag_alone() {
        let (mut store, api, _sink) = store_with(vec![task(1, "A", false, None)]);
        store.refresh().await.unwrap();

        api.fail_next_call();
        assert!(store.set_completed(&TaskId::Number(1), false).await.is_err());

        assert!(!store.tasks()[0].completed);
    }

    #[tokio::test]
    async fn remove_drops_the_record() {
        let (mut store, api, _sink) =
            store_with(vec![task(2, "B", false, None), task(1, "A", false, None)]);
        store.refresh().await.unwrap();

        store.remove(&TaskId::Number(2)).await.unwrap();

        assert_eq!(store.tasks(), &[task(1, "A", false, None)]);
        assert_eq!(api.stored().len(), 1);
    }

    #[tokio::test]
    async fn failed_remove_keeps_the_record() {
        let (mut store, api, _sink) = store_with(vec![task(1, "A", false, None)]);
        store.refresh().await.unwrap();

        api.fail_next_call();
        assert!(store.remove(&TaskId::Number(1)).await.is_err());

        assert_eq!(store.tasks().len(), 1);
    }

    #[tokio::test]
    async fn granting_permission_checks_immediately() {
        let (mut store, _api, sink) =
            store_with(vec![task(1, "A", false, Some("2020-01-01T10:00:00Z"))]);
        store.refresh().await.unwrap();

        let (permission, fired) = store.request_notifications();

        assert_eq!(permission, Permission::Granted);
        assert_eq!(fired.len(), 1);
        assert_eq!(sink.shown()[0].0, "Overdue: A");
    }

    #[tokio::test]
    async fn shutdown_stops_the_timer() {
        let (mut store, _api, _sink) = store_with(Vec::new());
        store.refresh().await.unwrap();
        assert!(store.scheduler().is_armed());

        store.shutdown();

        assert!(!store.scheduler().is_armed());
    }
}
