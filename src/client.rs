use std::fmt;

use reqwest::{header, Method};
use tokio::time::sleep;

use crate::{
    ApiResponse, ClientOptions, Credentials, HarnessError, NewUser, RequestOptions, Result,
    RetryPolicy,
};

const DEFAULT_BASE_URL: &str = "https://reqres.in";
const DEFAULT_API_KEY: &str = "reqres-free-v1";

#[derive(Clone)]
/// HTTP client for a ReqRes-style user-management API, with transparent
/// retry on rate limiting and transient server errors.
///
/// Every request carries the session headers (`x-api-key`, `Accept`) and
/// runs through the resilient wrapper: retryable statuses and transport
/// failures back off exponentially with jitter, anything else is returned
/// to the caller untouched. The client holds no cross-call state beyond
/// the underlying connection pool, so concurrent invocations are fully
/// independent.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    options: ClientOptions,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

impl ApiClient {
    /// Creates a client bound to a base URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
            options: ClientOptions::default(),
        }
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `BASE_URL` — base URL of the API under test
    ///   (default `https://reqres.in`)
    /// - `REQRES_API_KEY` — API key sent as `x-api-key`
    ///   (default `reqres-free-v1`, the free public key)
    ///
    /// Returns an error if either variable is set but empty.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let api_key =
            std::env::var("REQRES_API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_owned());
        if base_url.trim().is_empty() {
            return Err(HarnessError::Config("BASE_URL is set but empty".to_owned()));
        }
        if api_key.trim().is_empty() {
            return Err(HarnessError::Config(
                "REQRES_API_KEY is set but empty".to_owned(),
            ));
        }
        Ok(Self::new(base_url, api_key))
    }

    /// Applies client options such as timeout and retry policies.
    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Base URL this client is bound to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Typed endpoint operations ───────────────────────────────────────
    //
    // Each returns the raw response: the harness never judges status codes,
    // callers assert on them.

    /// `GET /api/users?page=..&per_page=..`
    pub async fn list_users(&self, page: u64, per_page: u64) -> Result<ApiResponse> {
        self.get(
            "/api/users",
            RequestOptions::new()
                .query("page", page)
                .query("per_page", per_page),
        )
        .await
    }

    /// `GET /api/users/{id}`. The id is not validated locally so negative
    /// tests can probe non-numeric and out-of-range values.
    pub async fn get_user(&self, id: impl fmt::Display) -> Result<ApiResponse> {
        self.get(&format!("/api/users/{id}"), RequestOptions::new())
            .await
    }

    /// `POST /api/users`. Creation runs in bulk mode: data-driven suites
    /// fire these in batches and trip rate limits more often.
    pub async fn create_user(&self, user: &NewUser) -> Result<ApiResponse> {
        self.post(
            "/api/users",
            RequestOptions::new().json(user).bulk_mode(),
        )
        .await
    }

    /// `PUT /api/users/{id}`
    pub async fn update_user(&self, id: impl fmt::Display, user: &NewUser) -> Result<ApiResponse> {
        self.request(
            Method::PUT,
            &format!("/api/users/{id}"),
            RequestOptions::new().json(user),
        )
        .await
    }

    /// `PATCH /api/users/{id}`
    pub async fn patch_user(&self, id: impl fmt::Display, user: &NewUser) -> Result<ApiResponse> {
        self.request(
            Method::PATCH,
            &format!("/api/users/{id}"),
            RequestOptions::new().json(user),
        )
        .await
    }

    /// `DELETE /api/users/{id}`
    pub async fn delete_user(&self, id: impl fmt::Display) -> Result<ApiResponse> {
        self.request(
            Method::DELETE,
            &format!("/api/users/{id}"),
            RequestOptions::new(),
        )
        .await
    }

    /// `POST /api/login`
    pub async fn login(&self, credentials: &Credentials) -> Result<ApiResponse> {
        self.post("/api/login", RequestOptions::new().json(credentials))
            .await
    }

    /// `POST /api/register`
    pub async fn register(&self, credentials: &Credentials) -> Result<ApiResponse> {
        self.post("/api/register", RequestOptions::new().json(credentials))
            .await
    }

    /// `POST /api/logout`
    pub async fn logout(&self) -> Result<ApiResponse> {
        self.post("/api/logout", RequestOptions::new()).await
    }

    /// `GET /api/unknown?page=..` — the secondary resource collection.
    pub async fn list_resources(&self, page: u64) -> Result<ApiResponse> {
        self.get("/api/unknown", RequestOptions::new().query("page", page))
            .await
    }

    // ── Generic verbs ───────────────────────────────────────────────────

    pub async fn get(&self, path: &str, opts: RequestOptions) -> Result<ApiResponse> {
        self.request(Method::GET, path, opts).await
    }

    pub async fn post(&self, path: &str, opts: RequestOptions) -> Result<ApiResponse> {
        self.request(Method::POST, path, opts).await
    }

    /// Performs one logical request with retry.
    ///
    /// Outcome contract: exactly one of
    /// - `Ok(response)` — the server's literal answer from the attempt that
    ///   succeeded, hit a non-retryable status, or exhausted the schedule
    ///   (in the last case tagged via [`crate::RETRIES_EXHAUSTED_HEADER`]);
    /// - `Err(Transport)` — the final transport failure, unmodified in kind.
    ///
    /// The asymmetry is deliberate: status exhaustion still produced a
    /// response, and callers assert on status codes, so it is handed back
    /// rather than raised. A transport failure has no response to return.
    /// Never more than `max_retries + 1` attempts are made.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        opts: RequestOptions,
    ) -> Result<ApiResponse> {
        let url = self.endpoint(path);
        let policy = self.select_policy(&opts);
        let max_retries = if opts.retry { policy.max_retries } else { 0 };
        let timeout = opts.timeout.unwrap_or(self.options.timeout);

        let mut attempt = 0u32;
        loop {
            let mut builder = self
                .http
                .request(method.clone(), &url)
                .header("x-api-key", self.api_key.as_str())
                .header(header::ACCEPT, "application/json")
                .timeout(timeout);
            if !opts.query.is_empty() {
                builder = builder.query(&opts.query);
            }
            if let Some(json) = &opts.json {
                builder = builder.json(json);
            } else if let Some(raw) = &opts.raw_body {
                builder = builder.body(raw.clone());
            }
            for (name, value) in opts.headers.iter() {
                builder = builder.header(name, value);
            }

            let outcome = async {
                let response = builder.send().await?;
                let status = response.status();
                let headers = response.headers().clone();
                let body = response.text().await?;
                Ok::<_, reqwest::Error>(ApiResponse::new(status, headers, body))
            }
            .await;

            match outcome {
                Ok(mut response) => {
                    if policy.retries(response.status()) {
                        if attempt < max_retries {
                            let wait = policy.backoff_delay(attempt);
                            tracing::warn!(
                                %method,
                                %url,
                                status = response.status().as_u16(),
                                attempt = attempt + 1,
                                attempts_allowed = max_retries + 1,
                                wait_s = wait.as_secs_f64(),
                                "retryable status, backing off"
                            );
                            sleep(wait).await;
                            attempt += 1;
                            continue;
                        }
                        if max_retries > 0 {
                            response.mark_retries_exhausted();
                        }
                    }
                    return Ok(response);
                }
                Err(err) => {
                    if attempt < max_retries {
                        let wait = policy.backoff_delay(attempt);
                        tracing::warn!(
                            %method,
                            %url,
                            error = %err,
                            attempt = attempt + 1,
                            attempts_allowed = max_retries + 1,
                            wait_s = wait.as_secs_f64(),
                            "transport failure, backing off"
                        );
                        sleep(wait).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(HarnessError::Transport(err));
                }
            }
        }
    }

    fn select_policy(&self, opts: &RequestOptions) -> &RetryPolicy {
        if opts.bulk_mode {
            &self.options.bulk_retry
        } else {
            &self.options.standard_retry
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
