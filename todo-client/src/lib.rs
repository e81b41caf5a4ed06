pub mod api;
pub mod due;
pub mod error;
pub mod grouping;
pub mod notify;
pub mod reminder;
pub mod store;
pub mod task;

pub use api::{HttpTodoApi, InMemoryTodoApi, TodoApi};
pub use error::TodoError;
pub use grouping::{group_by_due_date, DueBucket, TaskGroup};
pub use notify::{NotificationSink, Permission};
pub use reminder::{Reminder, ReminderKind, ReminderScheduler, ReminderSettings};
pub use store::TaskStore;
pub use task::{Task, TaskId};
