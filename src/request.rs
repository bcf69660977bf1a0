use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Per-call request configuration.
///
/// Defaults mirror the harness conventions: retry enabled, standard policy,
/// client-level timeout, no body.
#[derive(Clone, Debug)]
pub struct RequestOptions {
    /// Query parameters appended to the URL.
    pub query: Vec<(String, String)>,
    /// JSON body, serialized as `application/json`.
    pub json: Option<JsonValue>,
    /// Raw body, sent verbatim. Ignored when a JSON body is set.
    pub raw_body: Option<String>,
    /// Header overrides merged over the client's session headers.
    pub headers: HeaderMap,
    /// Per-attempt timeout override; falls back to the client default.
    pub timeout: Option<Duration>,
    /// When false, exactly one attempt is made regardless of policy.
    pub retry: bool,
    /// Selects the lenient bulk retry policy instead of the standard one.
    pub bulk_mode: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            query: Vec::new(),
            json: None,
            raw_body: None,
            headers: HeaderMap::new(),
            timeout: None,
            retry: true,
            bulk_mode: false,
        }
    }
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Sets a JSON body. Serialized once here, so the retry loop resends
    /// identical bytes on every attempt.
    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        self.json = serde_json::to_value(body).ok();
        self
    }

    /// Sets a raw, unserialized body.
    pub fn raw_body(mut self, body: impl Into<String>) -> Self {
        self.raw_body = Some(body.into());
        self
    }

    /// Adds a header override. Invalid names or values are ignored, since
    /// the harness only ever supplies static test headers.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name),
            HeaderValue::try_from(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Overrides the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disables retries: a single attempt only, independent of policy.
    pub fn no_retry(mut self) -> Self {
        self.retry = false;
        self
    }

    /// Opts into the bulk retry policy.
    pub fn bulk_mode(mut self) -> Self {
        self.bulk_mode = true;
        self
    }
}
