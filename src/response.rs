use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::{HarnessError, Result};

/// Marker header added to a response returned after the retry schedule was
/// exhausted on a retryable status. Lets callers distinguish "succeeded on
/// retry" from "gave up after max retries" without re-parsing attempt
/// counts.
pub const RETRIES_EXHAUSTED_HEADER: &str = "x-retries-exhausted";

/// Terminal outcome of one wrapped request: whatever the server returned on
/// the attempt that succeeded, hit a non-retryable status, or exhausted the
/// schedule. The body is fully read, so the value is freely cloneable and
/// decodable any number of times.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl ApiResponse {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, body: String) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code as received from the server.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers, plus [`RETRIES_EXHAUSTED_HEADER`] when applicable.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body text.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decodes the body as JSON into the expected shape.
    ///
    /// Deserializing into a typed model is the harness's schema check: a
    /// payload missing required fields or carrying wrong types fails here.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|source| HarnessError::Decode {
            context: format!("{} response body", self.status),
            source,
        })
    }

    /// Whether this response was returned only because the retry schedule
    /// ran out while the status stayed retryable.
    pub fn retries_exhausted(&self) -> bool {
        self.headers.contains_key(RETRIES_EXHAUSTED_HEADER)
    }

    pub(crate) fn mark_retries_exhausted(&mut self) {
        self.headers
            .insert(RETRIES_EXHAUSTED_HEADER, HeaderValue::from_static("true"));
    }
}
