// Session recovery
//
// When the appliance reports envelope code 401 the console must send the
// user back to the login page. That effect belongs to whoever owns
// navigation (browser shell, CLI, test harness); the classifier only calls
// `Navigator::redirect`.

use tracing::warn;

/// Route the console navigates to when the session is invalid.
pub const LOGIN_ROUTE: &str = "/login";

/// Navigation facility invoked on session expiry.
///
/// Called at most once per classified exchange, fire-and-forget.
pub trait Navigator: Send + Sync {
    fn redirect(&self, route: &str);
}

/// Navigator that only records the redirect in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, route: &str) {
        warn!(route, "appliance session expired, login required");
    }
}
