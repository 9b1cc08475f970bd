//! Outbound read collaborator for the fetch lifecycle.
//!
//! Models issue their single GET through the `Transport` trait so tests
//! can substitute a deterministic fake. `HttpTransport` is the production
//! implementation on top of a shared `reqwest` client.

use std::future::Future;
use std::pin::Pin;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

/// Failures a read can surface. The fetch lifecycle collapses all of
/// them into the `fetch:error` event; the variants exist for logging and
/// for callers driving a transport directly.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network-level failure, invalid URL, or an undecodable body.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response arrived with a non-success status.
    #[error("unexpected status {status}")]
    Status { status: u16 },
}

/// Boxed future returned by [`Transport::get_json`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, TransportError>> + Send + 'a>>;

/// A single JSON-decoded GET against a URL.
pub trait Transport: Send + Sync {
    fn get_json(&self, url: &str) -> TransportFuture<'_>;
}

/// HTTP transport backed by a reusable `reqwest` client.
///
/// No retry, no timeout beyond the client's own defaults, no
/// cancellation: one request per call, settled however the client
/// settles it.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to build transport client");
        Self { client }
    }

    /// Use a caller-configured client (timeouts, proxies, headers).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str) -> TransportFuture<'_> {
        // An unparseable URL (including the empty string for a model
        // without one) is carried inside the builder and surfaces as a
        // request error on send.
        let request = self.client.get(url);
        Box::pin(async move {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(TransportError::Status {
                    status: status.as_u16(),
                });
            }
            Ok(response.json().await?)
        })
    }
}
