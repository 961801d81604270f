//! User-visible notification sink.
//!
//! The engines surface transient messages (toasts in the UI) through this
//! trait. Delivery is fire-and-forget: nothing in this crate depends on a
//! notification having been shown.

/// Notification severity, mapped by the UI to a toast variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Sink for transient user-visible notifications.
pub trait NotificationSink {
    /// Emit a notification. Must not block.
    fn notify(&self, title: &str, message: &str, severity: Severity);
}

/// Default sink that logs notifications through `tracing`.
///
/// Useful for headless contexts and tests that don't assert on messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, title: &str, message: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::warn!(title, "{message}"),
            Severity::Info | Severity::Success => tracing::info!(title, "{message}"),
        }
    }
}
