//! Shared test utilities and mock infrastructure.

#![allow(dead_code)]

pub mod mock_server;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use simplekit::transport::{Transport, TransportError, TransportFuture};
use simplekit::Model;

/// One canned transport outcome.
#[derive(Clone)]
pub enum FakeOutcome {
    /// Successful read with this decoded body.
    Json(Value),
    /// Non-success status.
    Status(u16),
}

/// Deterministic in-memory transport.
///
/// Outcomes are served in enqueue order, one per request; requested URLs
/// are recorded for assertions. An optional delay keeps the response
/// pending so tests can observe the started/settled ordering.
pub struct FakeTransport {
    outcomes: Mutex<VecDeque<FakeOutcome>>,
    requests: Mutex<Vec<String>>,
    delay: Mutex<Option<Duration>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            delay: Mutex::new(None),
        })
    }

    pub fn enqueue_json(&self, body: &str) {
        let value = serde_json::from_str(body).expect("invalid canned JSON");
        self.outcomes.lock().push_back(FakeOutcome::Json(value));
    }

    pub fn enqueue_status(&self, status: u16) {
        self.outcomes.lock().push_back(FakeOutcome::Status(status));
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

impl Transport for FakeTransport {
    fn get_json(&self, url: &str) -> TransportFuture<'_> {
        self.requests.lock().push(url.to_string());
        let outcome = self.outcomes.lock().pop_front();
        let delay = *self.delay.lock();
        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            match outcome.expect("no canned outcome queued") {
                FakeOutcome::Json(value) => Ok(value),
                FakeOutcome::Status(status) => Err(TransportError::Status { status }),
            }
        })
    }
}

/// Bind a counting listener for `event` and return the counter.
pub fn count_events(model: &Model, event: &str) -> Arc<AtomicUsize> {
    let counter = Arc::new(AtomicUsize::new(0));
    let probe = Arc::clone(&counter);
    model.on(
        event,
        Arc::new(move |_receiver, _args| {
            probe.fetch_add(1, Ordering::SeqCst);
        }),
        None,
    );
    counter
}

/// Install a test subscriber once per test binary; later calls no-op.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("simplekit=debug")),
        )
        .with_test_writer()
        .try_init();
}
