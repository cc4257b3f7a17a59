//! Durable value — an in-memory value mirrored to a `KeyValueStore`.
//!
//! DESIGN
//! ======
//! `open` reads the backend once and falls back to the caller's initial
//! value when the entry is missing, unreadable, malformed, or of the wrong
//! shape. `set` replaces the in-memory value synchronously and enqueues one
//! persist job; a single writer task per store drains the queue in order,
//! so the last `set` is the last write.
//!
//! ERROR HANDLING
//! ==============
//! Persistence is best-effort. Encode and write failures are logged and
//! published as `PersistOutcome::Failed` to subscribers; the in-memory value
//! is never rolled back and nothing is retried.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, warn};

use super::{KeyValueStore, StoreError};

const OUTCOME_CHANNEL_CAPACITY: usize = 64;

// =============================================================================
// OUTCOMES
// =============================================================================

/// How `open` obtained the current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored under the key; the initial value is in use.
    Missing,
    /// The stored document was decoded successfully.
    Loaded,
    /// The stored document is not valid JSON; the initial value is in use.
    Malformed(String),
    /// The stored JSON does not have the expected shape; the initial value is in use.
    ShapeMismatch(String),
    /// The backend could not be read; the initial value is in use.
    Unavailable(String),
}

impl LoadOutcome {
    /// `true` when the initial value was used because of a problem, not
    /// because the key was simply empty.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::ShapeMismatch(_) | Self::Unavailable(_))
    }
}

/// Result of one persist attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Written { key: String, bytes: usize },
    Failed { key: String, reason: String },
}

// =============================================================================
// WRITER
// =============================================================================

enum WriteJob {
    Persist(Result<String, StoreError>),
    Flush(oneshot::Sender<()>),
}

fn spawn_writer(
    store: Arc<dyn KeyValueStore>,
    key: String,
    outcomes: broadcast::Sender<PersistOutcome>,
) -> mpsc::UnboundedSender<WriteJob> {
    let (tx, mut rx) = mpsc::unbounded_channel::<WriteJob>();

    tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            match job {
                WriteJob::Persist(encoded) => {
                    let outcome = persist(&store, &key, encoded).await;
                    // No subscribers is fine.
                    let _ = outcomes.send(outcome);
                }
                WriteJob::Flush(done) => {
                    let _ = done.send(());
                }
            }
        }
        debug!(key = %key, "durable writer stopped");
    });

    tx
}

async fn persist(store: &Arc<dyn KeyValueStore>, key: &str, encoded: Result<String, StoreError>) -> PersistOutcome {
    let result = match encoded {
        Ok(document) => {
            let bytes = document.len();
            let store = Arc::clone(store);
            let owned_key = key.to_owned();
            match tokio::task::spawn_blocking(move || store.set(&owned_key, &document)).await {
                Ok(Ok(())) => Ok(bytes),
                Ok(Err(e)) => Err(e.to_string()),
                Err(e) => Err(format!("storage task failed: {e}")),
            }
        }
        Err(e) => Err(e.to_string()),
    };

    match result {
        Ok(bytes) => {
            debug!(key = %key, bytes, "durable value written");
            PersistOutcome::Written { key: key.to_owned(), bytes }
        }
        Err(reason) => {
            warn!(key = %key, error = %reason, "error writing durable value");
            PersistOutcome::Failed { key: key.to_owned(), reason }
        }
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Default decoder: a sequence-vs-non-sequence guard when the initial value
/// is a sequence, then a typed serde decode.
fn decode_default<T: DeserializeOwned>(value: Value, expects_sequence: bool) -> Result<T, String> {
    if expects_sequence && !value.is_array() {
        return Err(format!("expected a sequence, got {value}"));
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}

fn load<T>(
    store: &dyn KeyValueStore,
    key: &str,
    initial: T,
    decode: impl FnOnce(Value) -> Result<T, String>,
) -> (T, LoadOutcome) {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (initial, LoadOutcome::Missing),
        Err(e) => {
            warn!(key = %key, error = %e, "error reading durable value");
            return (initial, LoadOutcome::Unavailable(e.to_string()));
        }
    };

    let parsed: Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(key = %key, error = %e, "error parsing durable value");
            return (initial, LoadOutcome::Malformed(e.to_string()));
        }
    };

    match decode(parsed) {
        Ok(value) => (value, LoadOutcome::Loaded),
        Err(reason) => {
            warn!(key = %key, stored = %raw, error = %reason, "unexpected durable value shape");
            (initial, LoadOutcome::ShapeMismatch(reason))
        }
    }
}

// =============================================================================
// DURABLE
// =============================================================================

/// A value of type `T` kept in memory and mirrored to a backend under `key`.
///
/// Must be opened inside a tokio runtime: the background writer is spawned
/// on open.
pub struct Durable<T> {
    key: String,
    value: T,
    load_outcome: LoadOutcome,
    writer: mpsc::UnboundedSender<WriteJob>,
    outcomes: broadcast::Sender<PersistOutcome>,
}

impl<T> Durable<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open `key`, falling back to `initial` when nothing usable is stored.
    ///
    /// When `initial` encodes as a JSON array, a stored non-array is rejected
    /// as a shape mismatch.
    pub fn open(store: Arc<dyn KeyValueStore>, key: impl Into<String>, initial: T) -> Self {
        let expects_sequence = serde_json::to_value(&initial).is_ok_and(|v| v.is_array());
        Self::open_with(store, key, initial, move |value| decode_default(value, expects_sequence))
    }

    /// Open `key` with a caller-supplied decoder. The decoder receives the
    /// parsed JSON and returns the typed value or a reason for rejecting it.
    pub fn open_with(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        initial: T,
        decode: impl FnOnce(Value) -> Result<T, String>,
    ) -> Self {
        let key = key.into();
        let (value, load_outcome) = load(store.as_ref(), &key, initial, decode);
        let (outcomes, _) = broadcast::channel(OUTCOME_CHANNEL_CAPACITY);
        let writer = spawn_writer(store, key.clone(), outcomes.clone());

        Self { key, value, load_outcome, writer, outcomes }
    }

    /// Replace the value. The in-memory value changes immediately; one
    /// persist attempt is queued.
    pub fn set(&mut self, value: T) {
        let encoded = serde_json::to_string(&value)
            .map_err(|e| StoreError::Encode { key: self.key.clone(), reason: e.to_string() });
        self.value = value;

        if self.writer.send(WriteJob::Persist(encoded)).is_err() {
            warn!(key = %self.key, "durable writer unavailable; value not persisted");
        }
    }

    /// Wait until every persist attempt queued before this call has run.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.writer.send(WriteJob::Flush(done)).is_err() {
            return;
        }
        let _ = wait.await;
    }

    /// Observe the outcome of every subsequent persist attempt.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PersistOutcome> {
        self.outcomes.subscribe()
    }
}

impl<T> Durable<T> {
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }
}

#[cfg(test)]
#[path = "durable_test.rs"]
mod tests;
