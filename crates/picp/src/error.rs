//! CLI error types with miette diagnostics.
//!
//! Maps `picp_api::Error` and `picp_config::ConfigError` into user-facing
//! errors with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use picp_config::ConfigError;

pub mod exit_code {
    #[allow(dead_code)]
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    /// 128 + SIGINT, as a shell reports an interrupted job.
    pub const CANCELLED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the appliance")]
    #[diagnostic(
        code(picp::connection_failed),
        help(
            "Check that the appliance is powered on and reachable.\n\
             The console listens on port 8888; pass --appliance http://<ip>:8888 \
             or set `appliance` in your profile."
        )
    )]
    ConnectionFailed {
        #[source]
        source: picp_api::TransportError,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(picp::tls),
        help("Use --insecure (-k) to accept a self-signed certificate, or fix ca_cert in your profile.")
    )]
    Tls { message: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(picp::timeout),
        help("Increase the timeout with --timeout or check that the appliance is responsive.")
    )]
    Timeout {
        #[source]
        source: picp_api::TransportError,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Console session expired")]
    #[diagnostic(code(picp::session_expired))]
    SessionExpired,

    #[error("Login failed: {message}")]
    #[diagnostic(
        code(picp::login_failed),
        help("Check the user and password, or the `user` entry of profile '{profile}'.")
    )]
    LoginFailed { message: String, profile: String },

    // ── Appliance ────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(picp::appliance_error), help("The appliance rejected the request (code {code})."))]
    Appliance { code: i64, message: String },

    #[error("server error {status}")]
    #[diagnostic(code(picp::http_status))]
    HttpStatus { status: u16 },

    #[error("Unexpected response from the appliance: {message}")]
    #[diagnostic(
        code(picp::decode),
        help("Is --appliance pointing at the picp console?")
    )]
    Decode { message: String },

    #[error("Request cancelled")]
    #[diagnostic(code(picp::cancelled))]
    Cancelled,

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(picp::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(picp::profile_not_found),
        help("Expected it under [profiles.{name}] in {path}")
    )]
    ProfileNotFound { name: String, path: String },

    #[error(transparent)]
    #[diagnostic(code(picp::config))]
    Config(ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(picp::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    #[diagnostic(code(picp::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::SessionExpired | Self::LoginFailed { .. } => exit_code::AUTH,
            Self::Validation { .. } | Self::ProfileNotFound { .. } => exit_code::USAGE,
            Self::Cancelled => exit_code::CANCELLED,
            _ => exit_code::GENERAL,
        }
    }

    /// Turn an application failure of the login route into `LoginFailed`.
    pub fn login(err: picp_api::Error, profile: &str) -> Self {
        match err {
            picp_api::Error::Application { msg, .. } => Self::LoginFailed {
                message: msg,
                profile: profile.to_owned(),
            },
            other => other.into(),
        }
    }
}

// ── picp_api::Error → CliError mapping ───────────────────────────────

impl From<picp_api::Error> for CliError {
    fn from(err: picp_api::Error) -> Self {
        use picp_api::Error;

        match err {
            Error::Network(source) if source.is_timeout() => Self::Timeout { source },
            Error::Network(source) => Self::ConnectionFailed { source },
            Error::HttpStatus(status) => Self::HttpStatus { status },
            Error::Application { code, msg } => Self::Appliance { code, message: msg },
            Error::SessionExpired => Self::SessionExpired,
            Error::Cancelled => Self::Cancelled,
            Error::Decode { message, .. } => Self::Decode { message },
            Error::InvalidRequest(reason) => Self::Validation {
                field: "request".into(),
                reason,
            },
            Error::InvalidUrl(e) => Self::Validation {
                field: "appliance".into(),
                reason: e.to_string(),
            },
            Error::Tls(message) => Self::Tls { message },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownProfile { name, path } => Self::ProfileNotFound { name, path },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_failure_kind() {
        let cases = [
            (
                CliError::from(picp_api::Error::Network(
                    picp_api::TransportError::Unreachable("refused".into()),
                )),
                exit_code::CONNECTION,
            ),
            (
                CliError::from(picp_api::Error::SessionExpired),
                exit_code::AUTH,
            ),
            (CliError::from(picp_api::Error::Cancelled), exit_code::CANCELLED),
            (
                CliError::from(picp_api::Error::HttpStatus(503)),
                exit_code::GENERAL,
            ),
            (
                CliError::from(picp_api::Error::InvalidRequest("bad".into())),
                exit_code::USAGE,
            ),
        ];
        for (err, code) in cases {
            assert_eq!(err.exit_code(), code, "{err:?}");
        }
    }

    #[test]
    fn appliance_message_is_shown_verbatim() {
        let err = CliError::from(picp_api::Error::Application {
            code: 1001,
            msg: "fan sensor offline".into(),
        });
        assert_eq!(err.to_string(), "fan sensor offline");
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn login_application_failure_is_auth() {
        let err = CliError::login(
            picp_api::Error::Application {
                code: 400,
                msg: "wrong user or password".into(),
            },
            "lab",
        );
        assert!(matches!(err, CliError::LoginFailed { .. }));
        assert_eq!(err.exit_code(), exit_code::AUTH);

        let passthrough = CliError::login(picp_api::Error::HttpStatus(502), "lab");
        assert!(matches!(passthrough, CliError::HttpStatus { status: 502 }));
    }
}
