// Notification seam
//
// The console shows outcomes as short-lived toasts. Rendering them is the
// presentation layer's job; this module fixes the interface and the policy
// for which failures are shown at all.

use std::time::Duration;

use crate::error::Error;

/// How long a toast stays on screen unless the caller says otherwise.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// Notification component supplied by the presentation layer.
pub trait Notifier {
    fn notify(&self, kind: NoticeKind, message: &str, duration: Duration);
}

/// Show `err` through `notifier` if the console policy says it should be seen.
///
/// Application failures show the appliance's message, HTTP failures a
/// generated `server error {status}` line. Cancelled requests and expired
/// sessions stay silent: the user asked for the first, navigation already
/// handled the second. Returns whether a notice was emitted.
pub fn report_failure(err: &Error, notifier: &dyn Notifier) -> bool {
    match err.user_message() {
        Some(message) => {
            notifier.notify(NoticeKind::Error, &message, DEFAULT_NOTICE_DURATION);
            true
        }
        None => false,
    }
}
