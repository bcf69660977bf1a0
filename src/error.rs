/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// Network or request execution error from `reqwest`, surfaced after
    /// the retry schedule is exhausted. The underlying error is preserved
    /// so callers can inspect its kind (`is_connect`, `is_timeout`, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Response body could not be decoded into the expected shape.
    #[error("decode error for {context}: {source}")]
    Decode {
        /// What was being decoded, for diagnostics.
        context: String,
        #[source]
        source: serde_json::Error,
    },
    /// Invalid client configuration (bad base URL, empty credentials).
    #[error("configuration error: {0}")]
    Config(String),
}
