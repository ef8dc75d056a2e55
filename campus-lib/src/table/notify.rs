//! Notification sink.

/// Fire-and-forget user notifications (toasts).
pub trait Notifier: Send + Sync {
    /// Reports a completed action.
    fn notify_success(&self, message: &str);

    /// Reports a failed action.
    fn notify_error(&self, message: &str);

    /// Reports a rejected or unsupported action.
    fn notify_warning(&self, message: &str);
}

/// A notifier that writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_success(&self, message: &str) {
        log::info!("{}", message);
    }

    fn notify_error(&self, message: &str) {
        log::error!("{}", message);
    }

    fn notify_warning(&self, message: &str) {
        log::warn!("{}", message);
    }
}
