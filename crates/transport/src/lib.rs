//! The HTTP transport boundary.
//!
//! This crate defines the contract the rest of the pipeline needs from a
//! transport (fetch a URL, get back parsed JSON) without providing a real
//! HTTP client — that lives outside this workspace. [`StaticFetcher`] is a
//! scripted test double used by the unit and integration tests of every
//! downstream crate.

use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

/// Errors a [`Fetcher`] may report. Distinguishes a failed fetch (network,
/// timeout, non-2xx) from a fetch that succeeded but did not return a JSON
/// object, since the two are logged and retried differently downstream.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TransportError {
    #[error("fetch failed for {url}: {message}")]
    FetchFailed { url: String, message: String },

    #[error("response from {url} was not a JSON object")]
    NotJsonObject { url: String },
}

/// A handle capable of fetching one URL at a time and returning parsed JSON.
///
/// Implementations are expected to be cheap to construct per worker (see
/// `goldmatch-season`'s partition-per-worker pool, which builds one
/// `Fetcher` per thread and never shares an instance across threads).
pub trait Fetcher: Send {
    fn fetch_json(&mut self, url: &str) -> Result<serde_json::Value, TransportError>;
}

/// A scripted, in-memory [`Fetcher`] used by tests and the `demos/`
/// example. URLs not present in the script fail with [`TransportError::FetchFailed`].
#[derive(Debug, Default, Clone)]
pub struct StaticFetcher {
    responses: HashMap<String, serde_json::Value>,
    /// URLs that should fail regardless of whether a response is scripted.
    failures: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a successful JSON response for `url`.
    pub fn with_response(mut self, url: impl Into<String>, body: serde_json::Value) -> Self {
        self.responses.insert(url.into(), body);
        self
    }

    /// Scripts a failing fetch for `url`.
    pub fn with_failure(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(url.into(), message.into());
        self
    }
}

impl Fetcher for StaticFetcher {
    fn fetch_json(&mut self, url: &str) -> Result<serde_json::Value, TransportError> {
        if let Some(message) = self.failures.get(url) {
            return Err(TransportError::FetchFailed {
                url: url.to_string(),
                message: message.clone(),
            });
        }
        match self.responses.get(url) {
            Some(value) if value.is_object() => Ok(value.clone()),
            Some(_) => Err(TransportError::NotJsonObject {
                url: url.to_string(),
            }),
            None => Err(TransportError::FetchFailed {
                url: url.to_string(),
                message: "no response scripted for this url".to_string(),
            }),
        }
    }
}

/// A thread-safe call counter wrapping a [`Fetcher`], handy for asserting
/// that retry scraping only touches the urls it needs to.
pub struct CountingFetcher<F> {
    inner: F,
    calls: Mutex<Vec<String>>,
}

impl<F: Fetcher> CountingFetcher<F> {
    pub fn new(inner: F) -> Self {
        CountingFetcher {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log poisoned").clone()
    }
}

impl<F: Fetcher> Fetcher for CountingFetcher<F> {
    fn fetch_json(&mut self, url: &str) -> Result<serde_json::Value, TransportError> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push(url.to_string());
        self.inner.fetch_json(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scripted_response_is_returned() {
        let mut fetcher = StaticFetcher::new().with_response("http://x/1", json!({"a": 1}));
        assert_eq!(fetcher.fetch_json("http://x/1").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn unscripted_url_fails() {
        let mut fetcher = StaticFetcher::new();
        assert!(matches!(
            fetcher.fetch_json("http://x/missing"),
            Err(TransportError::FetchFailed { .. })
        ));
    }

    #[test]
    fn non_object_response_is_rejected() {
        let mut fetcher = StaticFetcher::new().with_response("http://x/1", json!([1, 2, 3]));
        assert!(matches!(
            fetcher.fetch_json("http://x/1"),
            Err(TransportError::NotJsonObject { .. })
        ));
    }

    #[test]
    fn scripted_failure_takes_precedence_over_response() {
        let mut fetcher = StaticFetcher::new()
            .with_response("http://x/1", json!({"a": 1}))
            .with_failure("http://x/1", "503 upstream down");
        let err = fetcher.fetch_json("http://x/1").unwrap_err();
        assert!(matches!(err, TransportError::FetchFailed { message, .. } if message.contains("503")));
    }

    #[test]
    fn counting_fetcher_records_every_call() {
        let mut counting =
            CountingFetcher::new(StaticFetcher::new().with_response("http://x/1", json!({})));
        let _ = counting.fetch_json("http://x/1");
        let _ = counting.fetch_json("http://x/1");
        assert_eq!(counting.calls(), vec!["http://x/1", "http://x/1"]);
    }
}
