//! Dashboard Event Channel
//!
//! Notifications emitted by the controller for the presentation layer.
//! The controller detects failures and successes; how they are shown
//! (modal, toast, log line) is up to the subscriber.

/// Events broadcast by [`DashboardController`](super::DashboardController).
///
/// `LoadFailed` is emitted exactly once per failed `load()` attempt and is
/// the interruptive-notification channel: subscribers should surface it to
/// the operator immediately. `UploadFailed` carries the inline status text.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// A `load()` attempt failed; prior state is still displayed.
    LoadFailed(String),

    /// The selected file was accepted by the backend.
    UploadSucceeded,

    /// The upload was rejected; the message is the server-provided error
    /// text when available.
    UploadFailed(String),

    /// Summary, history, and trend were replaced from a fresh load cycle.
    Refreshed,
}
