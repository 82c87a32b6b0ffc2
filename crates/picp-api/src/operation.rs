// Logical request description
//
// An `Operation` names one appliance route plus its parameters. GET and
// DELETE carry query pairs, POST carries a JSON body and no query. The
// dispatcher turns it into an `HttpRequest` once the base URL is known.

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::error::Error;
use crate::transport::HttpRequest;

/// Appliance API routes.
pub mod paths {
    pub const DEVICES: &str = "/api/devices";
    pub const WIFI: &str = "/api/wifi";
    pub const WIFI_CONFIG: &str = "/api/wifi/config";
    pub const FAN: &str = "/api/fan";
    pub const DISPLAY: &str = "/api/display";
    pub const LOGIN: &str = "/api/login";
    pub const LOGIN_SETTING: &str = "/api/login_setting";
}

/// HTTP method of an appliance route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Delete => Self::DELETE,
        }
    }
}

/// One named, parameterized appliance request.
#[derive(Clone, PartialEq)]
pub struct Operation {
    method: Method,
    path: &'static str,
    query: Vec<(&'static str, String)>,
    body: Option<serde_json::Value>,
}

impl Operation {
    /// `GET path`, parameters (if any) added with [`with_query`](Self::with_query).
    pub fn get(path: &'static str) -> Self {
        Self {
            method: Method::Get,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    /// `DELETE path`, parameters (if any) added with [`with_query`](Self::with_query).
    pub fn delete(path: &'static str) -> Self {
        Self {
            method: Method::Delete,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    /// `POST path` with a JSON body.
    pub fn post(path: &'static str, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path,
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// `POST path` with any serializable body.
    ///
    /// Fails with [`Error::InvalidRequest`] when the value has no JSON form
    /// (e.g. a map with non-string keys).
    pub fn post_json(path: &'static str, body: &impl Serialize) -> Result<Self, Error> {
        let body = serde_json::to_value(body)
            .map_err(|e| Error::InvalidRequest(format!("body for {path} is not JSON: {e}")))?;
        Ok(Self::post(path, body))
    }

    /// Add a query-string pair. Ignored for POST, which sends its payload as body.
    pub fn with_query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        if self.method != Method::Post {
            self.query.push((key, value.into()));
        }
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Bind this operation to a concrete URL.
    pub(crate) fn into_request(self, url: Url) -> HttpRequest {
        HttpRequest {
            method: self.method,
            url,
            query: self
                .query
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v))
                .collect(),
            body: self.body,
        }
    }
}

// Bodies may carry credentials; only their presence is shown.
impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;

    #[test]
    fn get_carries_query_pairs() {
        let op = Operation::get(paths::WIFI).with_query("device", "wlan0");
        assert_eq!(op.method(), Method::Get);
        assert_eq!(op.path(), "/api/wifi");
        assert_eq!(op.query(), &[("device", "wlan0".to_owned())]);
        assert!(op.body().is_none());
    }

    #[test]
    fn post_ignores_query_pairs() {
        let op = Operation::post(paths::FAN, json!({ "Speed": 40 })).with_query("x", "y");
        assert!(op.query().is_empty());
        assert_eq!(op.body(), Some(&json!({ "Speed": 40 })));
    }

    #[test]
    fn post_json_rejects_non_json_bodies() {
        let mut bad: HashMap<(u8, u8), u8> = HashMap::new();
        bad.insert((1, 2), 3);
        let err = Operation::post_json(paths::FAN, &bad).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)), "got {err:?}");
    }

    #[test]
    fn debug_hides_body() {
        let op = Operation::post(paths::LOGIN, json!({ "password": "hunter22" }));
        let printed = format!("{op:?}");
        assert!(!printed.contains("hunter22"));
        assert!(printed.contains("has_body: true"));
    }

    #[test]
    fn into_request_binds_url() {
        let url = Url::parse("http://10.0.0.1:8888/api/wifi").unwrap();
        let req = Operation::delete(paths::WIFI)
            .with_query("connection_uuid", "c0ffee")
            .into_request(url.clone());
        assert_eq!(req.method, Method::Delete);
        assert_eq!(req.url, url);
        assert_eq!(
            req.query,
            vec![("connection_uuid".to_owned(), "c0ffee".to_owned())]
        );
    }
}
