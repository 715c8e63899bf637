//! An injectable, thread-safe progress observer for full scrapes.

use schema::MatchId;
use std::sync::Mutex;

/// Receives one call per completed match. Implementations must be `Send +
/// Sync`; the worker pool wraps every call in a mutex, so implementations
/// do not need their own internal locking for ordering, only for whatever
/// they do with the notification (e.g. updating a progress bar).
pub trait ProgressObserver: Send + Sync {
    fn on_match_done(&self, match_id: MatchId, succeeded: bool);
}

/// An observer that does nothing; the default when the caller does not
/// need progress reporting.
#[derive(Debug, Default)]
pub struct NoopProgressObserver;

impl ProgressObserver for NoopProgressObserver {
    fn on_match_done(&self, _match_id: MatchId, _succeeded: bool) {}
}

/// A test/demo observer that records every call in arrival order.
#[derive(Debug, Default)]
pub struct RecordingProgressObserver {
    events: Mutex<Vec<(MatchId, bool)>>,
}

impl RecordingProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(MatchId, bool)> {
        self.events.lock().expect("progress log poisoned").clone()
    }
}

impl ProgressObserver for RecordingProgressObserver {
    fn on_match_done(&self, match_id: MatchId, succeeded: bool) {
        self.events
            .lock()
            .expect("progress log poisoned")
            .push((match_id, succeeded));
    }
}
