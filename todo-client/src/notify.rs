//! Notification boundary. The host decides how reminders reach the user.

/// Whether the host has allowed notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    Granted,
    Denied,
    /// Not asked yet.
    #[default]
    Default,
}

/// Host notification surface.
///
/// Implementations that cannot show notifications at all report
/// [`Permission::Denied`] and treat `show` as a no-op.
pub trait NotificationSink: Send + Sync {
    fn permission(&self) -> Permission;

    /// Ask the user for permission. Only called in response to a user action.
    fn request_permission(&self) -> Permission;

    /// Fire-and-forget. No queuing or retry.
    fn show(&self, title: &str, body: &str);
}
