// Appliance API client
//
// Owns the base URL, the HTTP engine, and the navigator used for session
// recovery. `dispatch` is the single primitive every endpoint binding goes
// through; endpoint modules (devices, wifi, hardware, login) add inherent
// methods on top of it.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::classify::{classify, decode_payload};
use crate::error::Error;
use crate::operation::Operation;
use crate::pending::PendingRequest;
use crate::session::{LogNavigator, Navigator};
use crate::transport::{ReqwestTransport, Transport, TransportConfig};

/// Client for the appliance's console REST API.
///
/// Cheap to clone; clones share the HTTP engine (and its session cookie).
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Create a client backed by `reqwest`, built from `config`.
    ///
    /// `base_url` is the appliance root, e.g. `http://192.168.1.10:8888`.
    pub fn new(base_url: Url, config: &TransportConfig) -> Result<Self, Error> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(base_url, Arc::new(transport)))
    }

    /// Create a client from a URL string and a pre-built `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self::with_transport(
            base_url,
            Arc::new(ReqwestTransport::with_client(http)),
        ))
    }

    /// Create a client over any [`Transport`].
    pub fn with_transport(base_url: Url, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url,
            transport,
            navigator: Arc::new(LogNavigator),
        }
    }

    /// Replace the navigator invoked when the appliance reports an expired session.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the full URL for an API route: `{base}{path}`.
    ///
    /// Keeps any path prefix on the base URL (appliance behind a reverse proxy).
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Issue one exchange for `op` and return immediately.
    ///
    /// The exchange runs on a spawned task. Its result is classified (see
    /// [`classify`]) and the envelope's `data` decoded into `T`. Outside a
    /// Tokio runtime the request is rejected with [`Error::InvalidRequest`]
    /// and nothing is sent.
    pub fn dispatch<T>(&self, op: Operation) -> PendingRequest<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return PendingRequest::rejected(Error::InvalidRequest(format!(
                "{} {} dispatched outside a Tokio runtime",
                op.method(),
                op.path()
            )));
        };
        let url = match self.endpoint_url(op.path()) {
            Ok(url) => url,
            Err(e) => return PendingRequest::rejected(e),
        };

        debug!(method = %op.method(), path = op.path(), "dispatching request");

        let (pending, settlement) = PendingRequest::new();
        let transport = Arc::clone(&self.transport);
        let navigator = Arc::clone(&self.navigator);
        let request = op.into_request(url);

        runtime.spawn(async move {
            let token = settlement.token();
            let exchanged = tokio::select! {
                biased;
                () = token.cancelled() => None,
                result = transport.execute(request) => Some(result),
            };

            let outcome = match exchanged {
                Some(result) if settlement.settle() => {
                    classify(result, navigator.as_ref()).and_then(decode_payload::<T>)
                }
                _ => {
                    trace!("discarding exchange of cancelled request");
                    Err(Error::Cancelled)
                }
            };

            settlement.deliver(outcome);
        });

        pending
    }

    // ── Binding helpers ──────────────────────────────────────────────

    pub(crate) fn get<T>(&self, path: &'static str) -> PendingRequest<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.dispatch(Operation::get(path))
    }

    pub(crate) fn post<T>(&self, path: &'static str, body: &impl Serialize) -> PendingRequest<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        match Operation::post_json(path, body) {
            Ok(op) => self.dispatch(op),
            Err(e) => PendingRequest::rejected(e),
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
