use thiserror::Error;

/// Failure of the HTTP engine before any response was obtained.
///
/// Produced by [`Transport`](crate::Transport) implementations; the
/// classifier surfaces it as [`Error::Network`].
#[derive(Debug, Error)]
pub enum TransportError {
    /// Error raised by the `reqwest` engine (connection refused, DNS, timeout, ...).
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The appliance could not be reached for a reason reported as text.
    #[error("appliance unreachable: {0}")]
    Unreachable(String),
}

impl TransportError {
    /// Returns `true` if the engine gave up because a configured timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout(),
            Self::Unreachable(_) => false,
        }
    }
}

/// Top-level error type for the `picp-api` crate.
///
/// The first five variants are the outcome taxonomy of one exchange.
/// Only the classifier and the dispatcher construct them.
#[derive(Debug, Error)]
pub enum Error {
    // ── Exchange outcomes ───────────────────────────────────────────
    /// No HTTP response was obtained.
    #[error("network error: {0}")]
    Network(#[from] TransportError),

    /// The appliance (or a gateway in front of it) answered with a non-200 status.
    #[error("server error {0}")]
    HttpStatus(u16),

    /// HTTP 200 with an envelope code other than 200 / 401.
    #[error("appliance error {code}: {msg}")]
    Application { code: i64, msg: String },

    /// Envelope code 401: the console session is no longer valid.
    #[error("session expired -- login required")]
    SessionExpired,

    /// The caller cancelled the request before it settled.
    #[error("request cancelled")]
    Cancelled,

    // ── Data ────────────────────────────────────────────────────────
    /// HTTP 200 but the body (or its `data`) did not decode, with a body preview.
    #[error("failed to decode response: {message}")]
    Decode { message: String, body: String },

    // ── Local ───────────────────────────────────────────────────────
    /// The request was rejected locally; no exchange was issued.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// URL construction failed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),
}

impl Error {
    /// Returns `true` if the caller aborted this request.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` if the appliance reported the session as invalid.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// The HTTP status of a [`HttpStatus`](Self::HttpStatus) failure.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus(status) => Some(*status),
            _ => None,
        }
    }

    /// The envelope code of an [`Application`](Self::Application) failure.
    pub fn application_code(&self) -> Option<i64> {
        match self {
            Self::Application { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Text a console should show for this failure, or `None` when it should
    /// stay silent (cancelled by the user, or already handled by navigation).
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Cancelled | Self::SessionExpired => None,
            Self::Application { msg, .. } => Some(msg.clone()),
            Self::HttpStatus(status) => Some(format!("server error {status}")),
            other => Some(other.to_string()),
        }
    }
}
