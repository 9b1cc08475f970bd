//! Fetch lifecycle: one outbound JSON read mapped onto three events.
//!
//! `fetch:started` fires synchronously before the request is issued; the
//! request itself runs as a spawned task, so the caller gets control back
//! immediately and the finished/errored transition lands later on the
//! runtime. Overlapping fetches on one instance are independent; the
//! last completion wins per attribute key.

use serde_json::Value;
use tokio::task::JoinHandle;

use super::Model;

pub const FETCH_STARTED: &str = "fetch:started";
pub const FETCH_FINISHED: &str = "fetch:finished";
pub const FETCH_ERROR: &str = "fetch:error";

impl Model {
    /// Read the instance's configured URL and merge the decoded response
    /// into the attributes.
    ///
    /// Success sets every key of an object body via `set_attr` (full
    /// overwrite, keys absent from the response are kept) and then
    /// triggers `fetch:finished`. Any transport failure or non-success
    /// status triggers `fetch:error` with no payload and no attribute
    /// writes. A missing URL is not validated here; it fails in the
    /// transport and surfaces the same way.
    ///
    /// The returned handle resolves when the lifecycle has settled;
    /// callers that only care about the events may drop it.
    pub fn fetch(&self) -> JoinHandle<()> {
        self.trigger(FETCH_STARTED, &[]);
        let model = self.clone();
        tokio::spawn(async move {
            let url = model.url().unwrap_or_default();
            let transport = model.transport();
            match transport.get_json(&url).await {
                Ok(Value::Object(fields)) => {
                    for (name, value) in fields {
                        model.set_attr(name, value);
                    }
                    model.trigger(FETCH_FINISHED, &[]);
                }
                Ok(other) => {
                    // A decodable non-object body carries no attributes.
                    tracing::debug!(url = %url, body = %other, "fetch returned non-object body");
                    model.trigger(FETCH_FINISHED, &[]);
                }
                Err(err) => {
                    tracing::debug!(url = %url, error = %err, "fetch failed");
                    model.trigger(FETCH_ERROR, &[]);
                }
            }
        })
    }
}
