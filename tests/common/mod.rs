#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use parking_lot::Mutex;
use tokio::net::TcpListener;

use mjsonwp::transport::{Request, Response, Transport, TransportError};
use mjsonwp::{Dispatcher, HttpTransport, SessionId};

/// Session id every test dispatcher is created with.
pub const SESSION_ID: &str = "1234567890";

/// Path prefix of the session on the stub server.
pub const SESSION: &str = "/wd/hub/session/1234567890";

/// Envelope returned by stubs that don't care about the value.
pub const EMPTY_VALUE: &str = r#"{"value":""}"#;

/// One request as seen by the stub server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
struct Stub {
    method: Method,
    path: String,
    /// Exact request body the stub requires, if any.
    body: Option<String>,
    status: StatusCode,
    response: String,
}

#[derive(Default)]
struct StubState {
    stubs: Mutex<Vec<Stub>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// HTTP stub server: requests are recorded, then answered by the first stub
/// whose method, path and (if set) exact body match. Unmatched requests get a
/// 404 with an MJSONWP-style error envelope.
pub struct StubServer {
    pub addr: SocketAddr,
    state: Arc<StubState>,
}

impl StubServer {
    /// Starts the server on a random available port.
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = axum::Router::new()
            .fallback(handle)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        Self { addr, state }
    }

    /// Base URL a transport should be pointed at.
    pub fn base_url(&self) -> String {
        format!("http://{}/wd/hub", self.addr)
    }

    /// Dispatcher for [`SESSION_ID`] talking to this server over HTTP.
    pub fn dispatcher(&self) -> Dispatcher<HttpTransport> {
        let transport = HttpTransport::new(self.base_url().parse().unwrap()).unwrap();
        Dispatcher::new(transport, SessionId::new(SESSION_ID).unwrap())
    }

    /// Answer `method path` with 200 and `response`, whatever the body.
    pub fn stub(&self, method: Method, path: &str, response: &str) {
        self.push(method, path, None, StatusCode::OK, response);
    }

    /// Answer `method path` with 200 and `response` only when the request
    /// body is exactly `body`.
    pub fn stub_with_body(&self, method: Method, path: &str, body: &str, response: &str) {
        self.push(method, path, Some(body.to_string()), StatusCode::OK, response);
    }

    /// Answer `method path` with an arbitrary status and raw body.
    pub fn stub_status(&self, method: Method, path: &str, status: StatusCode, response: &str) {
        self.push(method, path, None, status, response);
    }

    fn push(&self, method: Method, path: &str, body: Option<String>, status: StatusCode, response: &str) {
        self.state.stubs.lock().push(Stub {
            method,
            path: path.to_string(),
            body,
            status,
            response: response.to_string(),
        });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    /// Number of requests received for `method path`.
    pub fn requested(&self, method: Method, path: &str) -> usize {
        self.state
            .requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

async fn handle(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        content_type,
        body: body.clone(),
    });

    let matched = state
        .stubs
        .lock()
        .iter()
        .find(|s| {
            s.method == method
                && s.path == uri.path()
                && s.body.as_ref().map_or(true, |b| *b == body)
        })
        .cloned();

    match matched {
        Some(stub) => (
            stub.status,
            [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
            stub.response,
        ),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
            r#"{"value":{"error":"unknown command","message":"no stub registered"}}"#.to_string(),
        ),
    }
}

/// In-process [`Transport`] that records requests and replays canned
/// responses in order.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<Request>>,
    responses: Mutex<Vec<Response>>,
}

impl RecordingTransport {
    pub fn replying(responses: impl IntoIterator<Item = (u16, &'static str)>) -> Self {
        let mut responses: Vec<Response> = responses
            .into_iter()
            .map(|(status, body)| Response {
                status,
                body: body.to_string(),
            })
            .collect();
        responses.reverse();
        Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(responses),
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        self.requests.lock().push(request);
        Ok(self.responses.lock().pop().unwrap_or(Response {
            status: 200,
            body: EMPTY_VALUE.to_string(),
        }))
    }
}

/// [`Transport`] whose every call fails.
pub struct FailingTransport;

impl Transport for FailingTransport {
    async fn send(&self, _request: Request) -> Result<Response, TransportError> {
        Err(TransportError::Custom("link down".into()))
    }
}

pub fn recording_dispatcher(transport: Arc<RecordingTransport>) -> Dispatcher<Arc<RecordingTransport>> {
    Dispatcher::new(transport, SessionId::new(SESSION_ID).unwrap())
}
