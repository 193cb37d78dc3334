//! User-facing notifications.

/// Shows transient, non-blocking messages to the user.
///
/// The only message the session layer raises is the OAuth error. Display
/// is best-effort: the notifier can't report failure and the caller never
/// waits on it.
pub trait Notifier: Send + Sync + 'static {
    /// Shows an error toast.
    fn error(&self, message: &str);
}

/// A [`Notifier`] that writes to the log. Used when no UI is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(message, "notification");
    }
}
