use todo_client::TaskId;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Backend work requested by key handlers. Actions run one at a time on the
/// UI loop, so store mutations never overlap.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Action {
    Refresh,
    SubmitNewTask,
    /// `current` is the completion status shown when the key was pressed.
    ToggleCompleted {
        id: TaskId,
        current: bool,
    },
    ConfirmDelete,
    RequestNotifications,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
