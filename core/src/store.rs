//! In-memory collection state for one endpoint, kept consistent with the
//! most recent known server truth on a best-effort basis.
//!
//! # Design
//! `ResourceStore` wraps a `ResourceClient` and owns one `CollectionState`
//! scoped to a single endpoint and resource type. Operations reconcile the
//! local collection from server responses rather than re-fetching: create
//! appends, update replaces in place, remove drops the matching row. A failed
//! fetch keeps whatever was loaded before (stale-but-visible) and records the
//! error message instead.
//!
//! # Concurrency
//! Operations take `&self` and may run concurrently from multiple threads.
//! The network call happens outside the state lock, so there is a gap between
//! an operation starting and its result being applied. Every invocation takes
//! a monotonically increasing sequence number at entry and its result is
//! applied only if no higher-numbered invocation has applied yet; a response
//! that lost the race is discarded rather than clobbering newer state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::client::ResourceClient;
use crate::error::ApiError;
use crate::resource::Resource;

/// The last known server-fetched set of resources for one endpoint, plus
/// operation status flags.
#[derive(Debug, Clone)]
pub struct CollectionState<T> {
    /// Rows in server order (fetch) with local appends at the end (create).
    /// Never contains two rows with the same id.
    pub data: Vec<T>,
    /// True while an operation is in flight.
    pub loading: bool,
    /// Message of the most recent failure; cleared at the start of each new
    /// operation.
    pub error: Option<String>,
    /// Single-item slot populated by `fetch_by_id` and refreshed by `update`.
    pub selected: Option<T>,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            loading: false,
            error: None,
            selected: None,
        }
    }
}

/// Signals that a caller is no longer interested in an operation's result.
///
/// Cancellation does not abort the network request; it only discards the
/// result at the apply step, leaving the collection untouched.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

struct Shared<T> {
    state: CollectionState<T>,
    next_seq: u64,
    applied_seq: u64,
}

/// Stateful controller for one resource collection.
///
/// Each operation sets `loading = true` and clears `error` at entry. Failures
/// are recovered into `error`; the mutating operations additionally return
/// `None`/`false` so callers can decide not to proceed. Nothing is retried
/// and nothing panics — the store always returns to idle.
pub struct ResourceStore<T: Resource> {
    client: ResourceClient,
    endpoint: String,
    shared: Mutex<Shared<T>>,
}

impl<T: Resource> ResourceStore<T> {
    pub fn new(client: ResourceClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            shared: Mutex::new(Shared {
                state: CollectionState::default(),
                next_seq: 0,
                applied_seq: 0,
            }),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// A point-in-time copy of the collection state.
    pub fn snapshot(&self) -> CollectionState<T> {
        self.lock().state.clone()
    }

    /// Replace the whole collection with the server's current set. On failure
    /// the previous rows stay visible and only `error` is set.
    pub fn fetch_all(&self, cancel: Option<&CancelToken>) {
        let seq = self.begin("fetch_all");
        match self.client.read_all::<T>(&self.endpoint) {
            Ok(rows) => {
                let rows = collapse_duplicate_ids(rows);
                self.apply(seq, cancel, move |state| state.data = rows);
            }
            Err(err) => self.fail(seq, cancel, &err),
        }
    }

    /// Fetch a single resource into the `selected` slot. The collection
    /// itself is not modified either way.
    pub fn fetch_by_id(&self, id: &str, cancel: Option<&CancelToken>) -> Option<T> {
        let seq = self.begin("fetch_by_id");
        match self.client.read_one::<T>(&self.endpoint, id) {
            Ok(item) => {
                let selected = item.clone();
                self.apply(seq, cancel, move |state| state.selected = Some(selected));
                Some(item)
            }
            Err(err) => {
                self.fail(seq, cancel, &err);
                None
            }
        }
    }

    /// Create a resource server-side and append the returned row. Should the
    /// server hand back an id that is already present, the existing row is
    /// replaced in place instead, so ids stay unique. Returns `None` on
    /// failure so callers can hold off (e.g. keep a form open).
    pub fn create(&self, input: &T::Create, cancel: Option<&CancelToken>) -> Option<T> {
        let seq = self.begin("create");
        match self.client.create::<T>(&self.endpoint, input) {
            Ok(created) => {
                let row = created.clone();
                self.apply(seq, cancel, move |state| upsert(&mut state.data, row));
                Some(created)
            }
            Err(err) => {
                self.fail(seq, cancel, &err);
                None
            }
        }
    }

    /// Replace the matching row with the server's updated representation,
    /// preserving its position; `selected` is refreshed when it holds the
    /// same id. Returns `None` on failure, leaving the collection unchanged.
    pub fn update(&self, id: &str, input: &T::Update, cancel: Option<&CancelToken>) -> Option<T> {
        let seq = self.begin("update");
        match self.client.update::<T>(&self.endpoint, id, input) {
            Ok(updated) => {
                let row = updated.clone();
                let id = id.to_string();
                self.apply(seq, cancel, move |state| {
                    if let Some(slot) = state.data.iter_mut().find(|r| r.id() == id) {
                        *slot = row.clone();
                    }
                    if state.selected.as_ref().is_some_and(|s| s.id() == id) {
                        state.selected = Some(row);
                    }
                });
                Some(updated)
            }
            Err(err) => {
                self.fail(seq, cancel, &err);
                None
            }
        }
    }

    /// Delete a resource server-side and drop the matching row; `selected`
    /// is cleared iff it holds the same id. Returns `false` on failure,
    /// leaving the collection unchanged.
    pub fn remove(&self, id: &str, cancel: Option<&CancelToken>) -> bool {
        let seq = self.begin("remove");
        match self.client.delete(&self.endpoint, id) {
            Ok(()) => {
                let id = id.to_string();
                self.apply(seq, cancel, move |state| {
                    state.data.retain(|r| r.id() != id);
                    if state.selected.as_ref().is_some_and(|s| s.id() == id) {
                        state.selected = None;
                    }
                });
                true
            }
            Err(err) => {
                self.fail(seq, cancel, &err);
                false
            }
        }
    }

    /// Manually set or clear the `selected` slot.
    pub fn select(&self, item: Option<T>) {
        self.lock().state.selected = item;
    }

    /// Drop the recorded error without starting a new operation.
    pub fn clear_error(&self) {
        self.lock().state.error = None;
    }

    /// Enter an operation: mark loading, clear the previous error, and take
    /// the next sequence number.
    fn begin(&self, op: &'static str) -> u64 {
        let mut shared = self.lock();
        shared.next_seq += 1;
        shared.state.loading = true;
        shared.state.error = None;
        debug!(endpoint = %self.endpoint, op, seq = shared.next_seq, "operation started");
        shared.next_seq
    }

    /// Apply an operation's outcome unless a higher-numbered invocation got
    /// there first or the caller cancelled. Returns whether the write ran.
    fn apply(
        &self,
        seq: u64,
        cancel: Option<&CancelToken>,
        write: impl FnOnce(&mut CollectionState<T>),
    ) -> bool {
        let mut shared = self.lock();
        if seq <= shared.applied_seq {
            debug!(endpoint = %self.endpoint, seq, "discarding stale result");
            return false;
        }
        shared.applied_seq = seq;
        shared.state.loading = false;
        if cancel.is_some_and(CancelToken::is_cancelled) {
            debug!(endpoint = %self.endpoint, seq, "discarding cancelled result");
            return false;
        }
        write(&mut shared.state);
        true
    }

    fn fail(&self, seq: u64, cancel: Option<&CancelToken>, err: &ApiError) {
        warn!(endpoint = %self.endpoint, error = %err, "operation failed");
        let message = err.to_string();
        self.apply(seq, cancel, move |state| state.error = Some(message));
    }

    fn lock(&self) -> MutexGuard<'_, Shared<T>> {
        // The state is a cache of server truth; a panic elsewhere does not
        // make it unusable, so poisoning is ignored.
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Replace the row with a matching id, or append when none exists.
fn upsert<T: Resource>(data: &mut Vec<T>, row: T) {
    match data.iter().position(|r| r.id() == row.id()) {
        Some(index) => data[index] = row,
        None => data.push(row),
    }
}

/// Keep the first occurrence of each id, preserving server order.
fn collapse_duplicate_ids<T: Resource>(rows: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(rows.len());
    for row in rows {
        if out.iter().all(|r| r.id() != row.id()) {
            out.push(row);
        }
    }
    out
}
