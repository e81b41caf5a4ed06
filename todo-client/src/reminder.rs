//! Periodic reminder checks over a snapshot of the task list.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use time::{OffsetDateTime, UtcOffset};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::due;
use crate::notify::{NotificationSink, Permission};
use crate::task::{Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderKind {
    /// The task falls due within the lead window.
    Upcoming,
    /// The due time has passed and the task is still open.
    Overdue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub task_id: TaskId,
    pub kind: ReminderKind,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ReminderSettings {
    /// Time between checks.
    pub period: Duration,
    /// How long before the due time an upcoming reminder fires.
    pub lead: time::Duration,
    /// Offset used to display due times.
    pub local: UtcOffset,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(60),
            lead: time::Duration::minutes(10),
            local: UtcOffset::UTC,
        }
    }
}

/// Reminders already fired this session, one flag per task and kind.
#[derive(Debug, Default)]
pub struct ReminderMarkers(HashSet<(TaskId, ReminderKind)>);

impl ReminderMarkers {
    pub fn contains(&self, id: &TaskId, kind: ReminderKind) -> bool {
        self.0.contains(&(id.clone(), kind))
    }

    pub fn insert(&mut self, id: TaskId, kind: ReminderKind) -> bool {
        self.0.insert((id, kind))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Reminders due at `now`, marking each one as fired.
///
/// A task yields at most one reminder per call and at most one of each kind
/// for the lifetime of `markers`.
pub fn due_reminders(
    tasks: &[Task],
    now: OffsetDateTime,
    settings: &ReminderSettings,
    markers: &mut ReminderMarkers,
) -> Vec<Reminder> {
    let mut reminders = Vec::new();

    for task in tasks {
        if task.completed {
            continue;
        }
        let Some(due_at) = task.due_at(settings.local) else {
            continue;
        };

        let in_lead_window = now < due_at
            && due_at
                .checked_sub(settings.lead)
                .is_some_and(|remind_at| remind_at <= now);
        let kind = if in_lead_window {
            ReminderKind::Upcoming
        } else if now >= due_at {
            ReminderKind::Overdue
        } else {
            continue;
        };

        if markers.contains(&task.id, kind) {
            continue;
        }

        let when = due::format_timestamp(due_at, settings.local);
        let (title, body) = match kind {
            ReminderKind::Upcoming => (
                format!("Reminder: {}", task.title),
                format!("Due at {when}"),
            ),
            ReminderKind::Overdue => (
                format!("Overdue: {}", task.title),
                format!("Was due at {when}"),
            ),
        };

        markers.insert(task.id.clone(), kind);
        reminders.push(Reminder {
            task_id: task.id.clone(),
            kind,
            title,
            body,
        });
    }

    reminders
}

fn run_check(
    tasks: &[Task],
    now: OffsetDateTime,
    settings: &ReminderSettings,
    sink: &dyn NotificationSink,
    markers: &Mutex<ReminderMarkers>,
) -> Vec<Reminder> {
    let reminders = {
        let mut markers = markers.lock().unwrap_or_else(PoisonError::into_inner);
        due_reminders(tasks, now, settings, &mut markers)
    };

    // Reminders due while notifications are not permitted are dropped, not
    // queued: their markers are already set.
    let permission = sink.permission();
    if permission != Permission::Granted {
        if !reminders.is_empty() {
            debug!(
                ?permission,
                dropped = reminders.len(),
                "notifications not permitted, dropping reminders"
            );
        }
        return Vec::new();
    }

    for reminder in &reminders {
        info!(
            task_id = %reminder.task_id,
            kind = ?reminder.kind,
            "Sending reminder"
        );
        sink.show(&reminder.title, &reminder.body);
    }

    reminders
}

/// Owns the recurring reminder timer.
///
/// Each timer checks the snapshot it was armed with; markers are shared
/// across re-arms so a reminder never fires twice.
pub struct ReminderScheduler {
    settings: ReminderSettings,
    sink: Arc<dyn NotificationSink>,
    markers: Arc<Mutex<ReminderMarkers>>,
    timer: Option<JoinHandle<()>>,
}

impl ReminderScheduler {
    pub fn new(sink: Arc<dyn NotificationSink>, settings: ReminderSettings) -> Self {
        Self {
            settings,
            sink,
            markers: Arc::new(Mutex::new(ReminderMarkers::default())),
            timer: None,
        }
    }

    pub fn sink(&self) -> &Arc<dyn NotificationSink> {
        &self.sink
    }

    /// Run one check now against `tasks`.
    pub fn check(&self, tasks: &[Task], now: OffsetDateTime) -> Vec<Reminder> {
        run_check(tasks, now, &self.settings, self.sink.as_ref(), &self.markers)
    }

    /// Cancel the running timer and start a new one bound to `snapshot`.
    /// The first check happens one period from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn rearm(&mut self, snapshot: Arc<[Task]>) {
        self.stop();

        let settings = self.settings;
        let sink = Arc::clone(&self.sink);
        let markers = Arc::clone(&self.markers);

        debug!(
            tasks = snapshot.len(),
            period_secs = settings.period.as_secs(),
            "Arming reminder timer"
        );

        self.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(settings.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                run_check(
                    &snapshot,
                    OffsetDateTime::now_utc(),
                    &settings,
                    sink.as_ref(),
                    &markers,
                );
            }
        }));
    }

    /// Check `snapshot` immediately, then [`rearm`](Self::rearm) with it.
    pub fn rearm_and_check(&mut self, snapshot: Arc<[Task]>) -> Vec<Reminder> {
        let fired = self.check(&snapshot, OffsetDateTime::now_utc());
        self.rearm(snapshot);
        fired
    }

    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            debug!("Reminder timer stopped");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    /// Number of reminders fired so far.
    pub fn fired_count(&self) -> usize {
        self.markers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
