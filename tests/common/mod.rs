#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use reqres_harness::{ClientOptions, RetryPolicy};
use serde_json::{json, Value as JsonValue};

#[derive(Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: Option<JsonValue>,
    pub delay: Duration,
}

impl MockResponse {
    pub fn json(status: StatusCode, body: JsonValue) -> Self {
        Self {
            status,
            body: Some(body),
            delay: Duration::from_millis(0),
        }
    }

    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            body: None,
            delay: Duration::from_millis(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// One request as the mock server saw it, for asserting on URL building,
/// session headers, and serialized bodies.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn json_body(&self) -> JsonValue {
        serde_json::from_str(&self.body).unwrap_or(JsonValue::Null)
    }
}

#[derive(Clone)]
struct MockState {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn mock_handler(State(state): State<MockState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap_or_default();

    state
        .requests
        .lock()
        .expect("request log mutex must not be poisoned")
        .push(RecordedRequest {
            method: parts.method.to_string(),
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    state.hits.fetch_add(1, Ordering::SeqCst);

    let scripted = {
        let mut queue = state
            .responses
            .lock()
            .expect("response queue mutex must not be poisoned");
        queue.pop_front().unwrap_or_else(|| {
            MockResponse::json(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "no mock response available"}),
            )
        })
    };

    if !scripted.delay.is_zero() {
        tokio::time::sleep(scripted.delay).await;
    }

    match scripted.body {
        Some(body) => (scripted.status, Json(body)).into_response(),
        None => (scripted.status, String::new()).into_response(),
    }
}

pub struct TestServer {
    pub base_url: String,
    pub hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl TestServer {
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("request log mutex must not be poisoned")
            .clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.recorded_requests()
            .last()
            .cloned()
            .expect("at least one request must have been recorded")
    }
}

pub async fn spawn_server(responses: Vec<MockResponse>) -> TestServer {
    let state = MockState {
        responses: Arc::new(Mutex::new(responses.into())),
        hits: Arc::new(AtomicUsize::new(0)),
        requests: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new()
        .fallback(mock_handler)
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind test listener");
    let address = listener.local_addr().expect("must have local addr");
    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock server must run");
    });

    TestServer {
        base_url: format!("http://{address}"),
        hits: state.hits,
        requests: state.requests,
        task,
    }
}

/// Retry policy scaled down to millisecond backoffs so exhaustion paths run
/// fast in tests while keeping the production status set.
pub fn fast_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        backoff_factor: 0.005,
        max_backoff: 0.02,
        retryable_statuses: vec![429, 502, 503, 504],
    }
}

pub fn fast_options(standard_retries: u32, bulk_retries: u32) -> ClientOptions {
    ClientOptions {
        timeout: Duration::from_secs(5),
        standard_retry: fast_policy(standard_retries),
        bulk_retry: fast_policy(bulk_retries),
    }
}

// ── Canned response bodies matching the target API's shapes ─────────────

pub fn user_body(id: u64, first_name: &str, last_name: &str) -> JsonValue {
    json!({
        "id": id,
        "email": format!("{}.{}@reqres.in", first_name.to_lowercase(), last_name.to_lowercase()),
        "first_name": first_name,
        "last_name": last_name,
        "avatar": format!("https://reqres.in/img/faces/{id}-image.jpg")
    })
}

pub fn support_body() -> JsonValue {
    json!({
        "url": "https://reqres.in/#support-heading",
        "text": "To keep ReqRes free, contributions are appreciated!"
    })
}

pub fn user_page_body(page: u64, users: Vec<JsonValue>) -> JsonValue {
    json!({
        "page": page,
        "per_page": users.len(),
        "total": 12,
        "total_pages": 2,
        "data": users,
        "support": support_body()
    })
}

pub fn single_user_body(id: u64, first_name: &str, last_name: &str) -> JsonValue {
    json!({
        "data": user_body(id, first_name, last_name),
        "support": support_body()
    })
}

pub fn created_user_body(name: &str, job: &str) -> JsonValue {
    json!({
        "name": name,
        "job": job,
        "id": "712",
        "createdAt": "2026-08-27T10:15:30.000Z"
    })
}

pub fn updated_user_body(name: &str, job: &str) -> JsonValue {
    json!({
        "name": name,
        "job": job,
        "updatedAt": "2026-08-27T11:00:00.000Z"
    })
}

pub fn error_body(message: &str) -> JsonValue {
    json!({ "error": message })
}
