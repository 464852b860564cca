#![allow(clippy::expect_used, dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use cinema_api::ApiClient;
use cinema_api::ClientConfig;
use cinema_api::HttpTransport;
use cinema_api::RefreshHandler;
use cinema_api::Session;
use cinema_api::TransportError;
use cinema_client::Request;
use cinema_client::Response;
use http::StatusCode;
use serde_json::Value;

pub const BASE_URL: &str = "http://backend.test/api";

type Responder = dyn Fn(&Request) -> Response + Send + Sync;

/// In-memory transport that records every request and answers through a
/// caller-provided function.
#[derive(Clone)]
pub struct MockTransport {
    responder: Arc<Responder>,
    seen: Arc<Mutex<Vec<Request>>>,
}

impl MockTransport {
    pub fn responding(responder: impl Fn(&Request) -> Response + Send + Sync + 'static) -> Self {
        Self {
            responder: Arc::new(responder),
            seen: Arc::default(),
        }
    }

    /// Replies in order; an unexpected extra request fails the test.
    pub fn scripted(replies: Vec<Response>) -> Self {
        let queue = Mutex::new(VecDeque::from(replies));
        Self::responding(move |_| {
            queue
                .lock()
                .expect("lock poisoned")
                .pop_front()
                .expect("more requests than scripted replies")
        })
    }

    pub fn seen(&self) -> Vec<Request> {
        self.seen.lock().expect("lock poisoned").clone()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().expect("lock poisoned").len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, req: Request) -> Result<Response, TransportError> {
        let response = (self.responder)(&req);
        self.seen.lock().expect("lock poisoned").push(req);
        Ok(response)
    }
}

pub fn json_response(status: StatusCode, body: Value) -> Response {
    Response::new(
        status,
        serde_json::to_vec(&body).expect("serializable body"),
    )
}

pub fn client_with(transport: MockTransport) -> ApiClient<MockTransport> {
    ApiClient::new(
        transport,
        ClientConfig::new(BASE_URL),
        Arc::new(Session::new()),
    )
}

pub fn bearer(request: &Request) -> Option<String> {
    request
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Refresh handler with a fixed outcome that optionally rotates the access
/// token before answering.
pub struct StubRefresher {
    session: Arc<Session>,
    outcome: Result<bool, String>,
    rotate_to: Option<&'static str>,
    delay: Duration,
    calls: AtomicUsize,
}

impl StubRefresher {
    pub fn new(session: Arc<Session>, outcome: Result<bool, String>) -> Self {
        Self {
            session,
            outcome,
            rotate_to: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn rotating_to(mut self, token: &'static str) -> Self {
        self.rotate_to = Some(token);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RefreshHandler for StubRefresher {
    async fn refresh(&self) -> Result<bool, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(token) = self.rotate_to {
            self.session.set_access_token(Some(token));
        }
        self.outcome.clone()
    }
}
