use std::sync::{Mutex, PoisonError};

use time::OffsetDateTime;
use todo_client::{NotificationSink, Permission};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A reminder delivered to the terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub received_at: OffsetDateTime,
}

pub type NoticeRx = UnboundedReceiver<Notice>;

/// Shows reminders inside the TUI.
///
/// Permission starts undetermined and is only granted on request. With
/// reminders disabled in config every request is denied.
pub struct TerminalNotifier {
    enabled: bool,
    permission: Mutex<Permission>,
    tx: UnboundedSender<Notice>,
}

impl TerminalNotifier {
    pub fn new(enabled: bool) -> (Self, NoticeRx) {
        let (tx, rx) = mpsc::unbounded_channel();
        let notifier = Self {
            enabled,
            permission: Mutex::new(Permission::Default),
            tx,
        };
        (notifier, rx)
    }
}

impl NotificationSink for TerminalNotifier {
    fn permission(&self) -> Permission {
        *self.permission.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn request_permission(&self) -> Permission {
        let mut permission = self.permission.lock().unwrap_or_else(PoisonError::into_inner);
        if self.enabled {
            *permission = Permission::Granted;
        } else {
            tracing::info!("Reminders are disabled in config; notifications unsupported");
            *permission = Permission::Denied;
        }
        *permission
    }

    fn show(&self, title: &str, body: &str) {
        if self.permission() != Permission::Granted {
            return;
        }
        let notice = Notice {
            title: title.to_string(),
            body: body.to_string(),
            received_at: OffsetDateTime::now_utc(),
        };
        if self.tx.send(notice).is_err() {
            tracing::debug!(title, "UI is gone, dropping notification");
        }
    }
}
