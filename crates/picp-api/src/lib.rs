//! Async access layer for the picp appliance console.
//!
//! Every console action reaches the appliance REST API through [`ApiClient`]:
//!
//! - **Dispatch**: [`ApiClient::dispatch`] turns one [`Operation`] into exactly
//!   one HTTP exchange and hands back a [`PendingRequest`] immediately. The
//!   exchange runs on a spawned task; the caller awaits the pending value or
//!   aborts it through its [`CancelHandle`].
//!
//! - **Classification**: [`classify`] is the only place that reads the
//!   appliance's `{ code, data, msg }` envelope. Non-200 HTTP statuses become
//!   [`Error::HttpStatus`] without touching the body, envelope code `401`
//!   becomes [`Error::SessionExpired`] (after asking the [`Navigator`] to
//!   redirect to the login route), any other non-200 code becomes
//!   [`Error::Application`].
//!
//! - **Endpoints**: thin bindings (`get_devices`, `list_wifi_ap`,
//!   `set_fan_config`, ...) that fix method + path and forward their argument
//!   as query or body.

pub mod classify;
pub mod client;
pub mod error;
pub mod models;
pub mod notify;
pub mod operation;
pub mod pending;
pub mod session;
pub mod transport;

mod devices;
mod hardware;
mod login;
mod wifi;

pub use classify::{Envelope, classify};
pub use client::ApiClient;
pub use error::{Error, TransportError};
pub use models::{
    DisplayConfig, FanConfig, LoginCredentials, LoginSetting, LoginSettingUpdate, NetDevice,
    WifiAp, WifiApSetting, WifiConfig,
};
pub use notify::{DEFAULT_NOTICE_DURATION, NoticeKind, Notifier, report_failure};
pub use operation::{Method, Operation, paths};
pub use pending::{CancelHandle, PendingRequest};
pub use session::{LOGIN_ROUTE, LogNavigator, Navigator};
pub use transport::{
    HttpRequest, ReqwestTransport, TlsMode, Transport, TransportConfig, TransportResponse,
};
