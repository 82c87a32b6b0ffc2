// Response classification
//
// Single canonical reading of one exchange result. The order of the checks
// is the tie-break policy:
//
//   1. no response at all            -> Network
//   2. HTTP status != 200            -> HttpStatus (body untouched)
//   3. envelope code 200             -> data
//   4. envelope code 401             -> redirect to login, SessionExpired
//   5. any other envelope code       -> Application(code, msg)
//
// The appliance answers every application-level outcome with HTTP 200,
// non-200 statuses come from the transport or a gateway in front of it.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::error::{Error, TransportError};
use crate::session::{LOGIN_ROUTE, Navigator};
use crate::transport::TransportResponse;

/// Envelope code for success.
pub const CODE_OK: i64 = 200;
/// Envelope code for an invalid session.
pub const CODE_UNAUTHORIZED: i64 = 401;

const PREVIEW_LEN: usize = 200;

/// The appliance's application-level response wrapper.
///
/// ```json
/// { "code": 200, "data": { ... }, "msg": "optional" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub msg: Option<String>,
}

/// Classify one exchange result into exactly one outcome.
///
/// Returns the envelope's `data` (JSON `null` when absent) on success. On
/// envelope code 401 the navigator is asked to redirect to [`LOGIN_ROUTE`]
/// before [`Error::SessionExpired`] is returned.
pub fn classify(
    result: Result<TransportResponse, TransportError>,
    navigator: &dyn Navigator,
) -> Result<serde_json::Value, Error> {
    let resp = result?;

    if resp.status != 200 {
        trace!(status = resp.status, "non-200 status");
        return Err(Error::HttpStatus(resp.status));
    }

    let envelope: Envelope = serde_json::from_slice(&resp.body).map_err(|e| {
        let body = String::from_utf8_lossy(&resp.body).into_owned();
        let preview = preview(&body);
        Error::Decode {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })?;

    match envelope.code {
        CODE_OK => {
            trace!("envelope ok");
            Ok(envelope.data.unwrap_or(serde_json::Value::Null))
        }
        CODE_UNAUTHORIZED => {
            trace!("envelope reports expired session");
            navigator.redirect(LOGIN_ROUTE);
            Err(Error::SessionExpired)
        }
        code => {
            trace!(code, "envelope reports application error");
            Err(Error::Application {
                code,
                msg: envelope.msg.unwrap_or_default(),
            })
        }
    }
}

/// Decode a classified payload into the caller's model.
pub(crate) fn decode_payload<T: DeserializeOwned>(data: serde_json::Value) -> Result<T, Error> {
    serde_json::from_value::<T>(data.clone()).map_err(|e| {
        let body = data.to_string();
        Error::Decode {
            message: format!("{e} (data preview: {:?})", preview(&body)),
            body,
        }
    })
}

fn preview(body: &str) -> &str {
    let mut end = body.len().min(PREVIEW_LEN);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
