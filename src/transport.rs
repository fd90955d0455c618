//! The HTTP collaborator the dispatcher sends requests through.
//!
//! [`Transport`] is the only seam between command dispatch and the network:
//! one request in, one status + raw body out. [`HttpTransport`] is the
//! `reqwest` implementation used against a real server.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use thiserror::Error;

use crate::command::HttpMethod;

/// Shared connect and request timeouts for server requests.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// A request as handed to a [`Transport`]. `path` is relative to the server
/// base URL; `body` is already-serialized JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<String>,
}

/// Status and raw body of a server response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("could not connect to {url}: is the server running?")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("transport failed: {0}")]
    Custom(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Classify a reqwest error for `url` into a human-friendly variant.
    fn from_reqwest(url: &str, e: reqwest::Error) -> Self {
        let url = url.to_string();
        if e.is_connect() {
            TransportError::Connect { url, source: e }
        } else if e.is_timeout() {
            TransportError::Timeout { url, source: e }
        } else {
            TransportError::Request { url, source: e }
        }
    }
}

/// Issues exactly one request per call. Retries, if any, belong to the
/// implementation.
pub trait Transport: Send + Sync {
    fn send(&self, request: Request)
        -> impl Future<Output = Result<Response, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(&self, request: Request)
        -> impl Future<Output = Result<Response, TransportError>> + Send {
        (**self).send(request)
    }
}

/// [`Transport`] over HTTP(S) using a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
}

impl HttpTransport {
    /// Build a transport for the server at `base` (e.g.
    /// `http://127.0.0.1:4723/wd/hub`) with the default timeouts.
    pub fn new(base: Url) -> Result<Self, TransportError> {
        Self::with_timeouts(base, CONNECT_TIMEOUT, REQUEST_TIMEOUT)
    }

    pub fn with_timeouts(
        base: Url,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .user_agent(concat!("mjsonwp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TransportError::Client)?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Append a server-relative `path` to the base URL, keeping any base
    /// path prefix such as `/wd/hub`.
    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base.as_str().trim_end_matches('/'), path)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let url = self.url_for(&request.path);

        let mut req = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        }
        .header(ACCEPT, "application/json");
        if let Some(body) = request.body {
            req = req.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&url, e))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(&url, e))?;

        tracing::trace!(%url, status, "server responded");
        Ok(Response { status, body })
    }
}
