use std::collections::VecDeque;

use time::{OffsetDateTime, UtcOffset};
use todo_client::{Task, TaskGroup, TaskId, TaskStore};

use crate::notifier::Notice;

mod navigation;
mod state;
pub use state::{AddField, DeleteContext, TextInput, View};

/// Reminders kept on screen.
const MAX_NOTICES: usize = 4;

pub struct App {
    pub running: bool,
    pub store: TaskStore,
    /// Offset used for grouping and display. Read once at startup.
    pub local: UtcOffset,
    pub backend_label: String,
    pub status_message: Option<String>,
    pub current_view: View,

    /// Index into [`App::display_order`].
    pub selected_index: usize,

    // Add-task form
    pub title_input: TextInput,
    pub due_input: TextInput,
    pub add_field: AddField,

    pub delete_context: Option<DeleteContext>,

    /// Most recent reminders, newest first.
    pub notices: VecDeque<Notice>,
}

impl App {
    pub fn new(store: TaskStore, local: UtcOffset, backend_label: impl Into<String>) -> Self {
        Self {
            running: true,
            store,
            local,
            backend_label: backend_label.into(),
            status_message: None,
            current_view: View::Tasks,
            selected_index: 0,
            title_input: TextInput::new(),
            due_input: TextInput::new(),
            add_field: AddField::Title,
            delete_context: None,
            notices: VecDeque::new(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn grouped(&self) -> Vec<TaskGroup<'_>> {
        self.store.grouped(self.local)
    }

    /// Tasks in the order they are drawn: by due-day bucket, undated last.
    pub fn display_order(&self) -> Vec<&Task> {
        self.grouped()
            .into_iter()
            .flat_map(|group| group.tasks)
            .collect()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.display_order().get(self.selected_index).copied()
    }

    /// Open task whose due time has passed.
    pub fn is_overdue(&self, task: &Task, now: OffsetDateTime) -> bool {
        !task.completed && task.due_at(self.local).is_some_and(|due| due <= now)
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.set_status(format!("{} ({})", notice.title, notice.body));
        self.notices.push_front(notice);
        self.notices.truncate(MAX_NOTICES);
    }
}
