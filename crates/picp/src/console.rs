//! Terminal presentation of notices and session recovery.

use std::io::{self, Write};
use std::time::Duration;

use owo_colors::OwoColorize;

use picp_api::{LOGIN_ROUTE, Navigator, NoticeKind, Notifier};

/// Prints notices to stderr, one line each.
///
/// A terminal line does not expire; the duration is only logged.
#[derive(Debug, Clone, Copy)]
pub struct TerminalNotifier {
    color: bool,
    quiet: bool,
}

impl TerminalNotifier {
    pub fn new(color: bool, quiet: bool) -> Self {
        Self { color, quiet }
    }

    fn format(&self, kind: NoticeKind, message: &str) -> String {
        let mark = match kind {
            NoticeKind::Success => "✓",
            NoticeKind::Warning => "!",
            NoticeKind::Error => "✗",
        };
        if !self.color {
            return format!("{mark} {message}");
        }
        match kind {
            NoticeKind::Success => format!("{} {message}", mark.green().bold()),
            NoticeKind::Warning => format!("{} {message}", mark.yellow().bold()),
            NoticeKind::Error => format!("{} {}", mark.red().bold(), message.red()),
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, kind: NoticeKind, message: &str, duration: Duration) {
        // Errors are never silenced by --quiet.
        if self.quiet && kind != NoticeKind::Error {
            return;
        }
        tracing::trace!(?kind, ?duration, "notice");
        let _ = writeln!(io::stderr().lock(), "{}", self.format(kind, message));
    }
}

/// Session recovery for a terminal: there is no page to navigate to, so the
/// redirect becomes a hint to run `picp login`.
#[derive(Debug, Clone)]
pub struct LoginHint {
    notifier: TerminalNotifier,
    profile: String,
}

impl LoginHint {
    pub fn new(notifier: TerminalNotifier, profile: &str) -> Self {
        Self {
            notifier,
            profile: profile.to_owned(),
        }
    }

    fn hint(&self) -> String {
        format!(
            "login required; run `picp --profile {} login` to start a new session",
            self.profile
        )
    }
}

impl Navigator for LoginHint {
    fn redirect(&self, route: &str) {
        tracing::debug!(route, "session recovery requested");
        if route == LOGIN_ROUTE {
            self.notifier.notify(
                NoticeKind::Warning,
                &self.hint(),
                picp_api::DEFAULT_NOTICE_DURATION,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_format_has_marks() {
        let n = TerminalNotifier::new(false, false);
        assert_eq!(n.format(NoticeKind::Success, "fan settings saved"), "✓ fan settings saved");
        assert_eq!(n.format(NoticeKind::Error, "server error 503"), "✗ server error 503");
    }

    #[test]
    fn hint_names_the_profile() {
        let hint = LoginHint::new(TerminalNotifier::new(false, false), "lab");
        assert!(hint.hint().contains("--profile lab login"));
    }
}
