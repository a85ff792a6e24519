// crates/screenflow-store/src/store.rs
// ============================================================================
// Module: Error Store
// Description: Classified, subscription-based in-flight error collection.
// Purpose: Let UI layers observe frozen error snapshots with no-op
//          suppression for ineffective mutations.
// Dependencies: crate::item, time
// ============================================================================

//! ## Overview
//! The store keeps three frozen buckets (`server`, `client`, `developer`).
//! Every mutation installs a new snapshot; the snapshot reference is stable
//! between mutations so consumers can detect change by identity
//! (`Arc::ptr_eq`). A mutation that would produce a bucket equal to the
//! current one *by id sequence* is suppressed entirely: no new snapshot, no
//! notification. Listeners are invoked synchronously, outside the store
//! lock, after every effective change.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::Weak;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use time::OffsetDateTime;

use crate::item::ErrorId;
use crate::item::ErrorItem;
use crate::item::ErrorKind;
use crate::item::ErrorReport;

// ============================================================================
// SECTION: Buckets
// ============================================================================

/// Frozen three-bucket error snapshot.
///
/// # Invariants
/// - Buckets are structurally immutable; mutation installs a new snapshot.
#[derive(Debug, Clone)]
pub struct ErrorBuckets {
    /// Errors originating from the server.
    pub server: Arc<[ErrorItem]>,
    /// Errors from client-side validation.
    pub client: Arc<[ErrorItem]>,
    /// Errors from integration misuse.
    pub developer: Arc<[ErrorItem]>,
}

impl ErrorBuckets {
    /// Creates an empty snapshot.
    #[must_use]
    fn empty() -> Self {
        Self {
            server: Arc::from(Vec::new()),
            client: Arc::from(Vec::new()),
            developer: Arc::from(Vec::new()),
        }
    }

    /// Returns the bucket for a kind.
    #[must_use]
    pub fn bucket(&self, kind: ErrorKind) -> &Arc<[ErrorItem]> {
        match kind {
            ErrorKind::Server => &self.server,
            ErrorKind::Client => &self.client,
            ErrorKind::Developer => &self.developer,
        }
    }

    /// Returns a copy with one bucket swapped out.
    fn with_bucket(&self, kind: ErrorKind, bucket: Arc<[ErrorItem]>) -> Self {
        let mut next = self.clone();
        match kind {
            ErrorKind::Server => next.server = bucket,
            ErrorKind::Client => next.client = bucket,
            ErrorKind::Developer => next.developer = bucket,
        }
        next
    }

    /// Returns whether every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.server.is_empty() && self.client.is_empty() && self.developer.is_empty()
    }
}

// ============================================================================
// SECTION: Matchers
// ============================================================================

/// Removal matcher: an exact id or an arbitrary predicate.
pub enum Matcher<'a> {
    /// Match by exact identifier.
    Id(&'a ErrorId),
    /// Match by predicate.
    Predicate(&'a dyn Fn(&ErrorItem) -> bool),
}

impl Matcher<'_> {
    /// Returns whether the item matches.
    fn matches(&self, item: &ErrorItem) -> bool {
        match self {
            Matcher::Id(id) => item.id == **id,
            Matcher::Predicate(predicate) => predicate(item),
        }
    }
}

impl std::fmt::Debug for Matcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => f.debug_tuple("Id").field(id).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

// ============================================================================
// SECTION: Id Generation
// ============================================================================

/// Generates collision-resistant, session-unique error ids.
///
/// # Invariants
/// - Ids combine a unix-millis component with a monotonic counter and are
///   never reused.
#[derive(Debug)]
struct IdFactory {
    /// Monotonic per-store counter.
    counter: AtomicU64,
}

impl IdFactory {
    /// Creates a factory starting at zero.
    const fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Returns the next identifier.
    fn next(&self) -> ErrorId {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let millis = unix_millis();
        ErrorId::new(format!("err-{millis}-{seq}"))
    }
}

/// Returns the current unix time in milliseconds.
fn unix_millis() -> i64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    i64::try_from(nanos / 1_000_000).unwrap_or(i64::MAX)
}

// ============================================================================
// SECTION: Listeners
// ============================================================================

/// Zero-argument change listener.
type Listener = Arc<dyn Fn() + Send + Sync>;

/// Registered listener entry.
struct ListenerEntry {
    /// Registration identifier used for unsubscription.
    id: u64,
    /// Listener callback.
    callback: Listener,
}

/// Subscription handle; unsubscribes on drop or via
/// [`Subscription::unsubscribe`].
#[derive(Debug)]
pub struct Subscription {
    /// Weak link back to the store internals.
    inner: Weak<Mutex<Inner>>,
    /// Registration identifier.
    id: u64,
}

impl Subscription {
    /// Explicitly removes the listener.
    pub fn unsubscribe(self) {
        // Drop performs the removal.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut guard = lock_inner(&inner);
            guard.listeners.retain(|entry| entry.id != self.id);
        }
    }
}

// ============================================================================
// SECTION: Store Internals
// ============================================================================

/// Mutable store internals behind the lock.
struct Inner {
    /// Current frozen snapshot.
    snapshot: Arc<ErrorBuckets>,
    /// Registered listeners.
    listeners: Vec<ListenerEntry>,
    /// Next listener registration identifier.
    next_listener_id: u64,
}

/// Locks store internals, recovering from a poisoned mutex.
fn lock_inner(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    match inner.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

// ============================================================================
// SECTION: Error Store
// ============================================================================

/// Classified, observable collection of in-flight errors.
///
/// # Invariants
/// - All operations are total; the store never fails.
/// - Snapshots are referentially stable between effective mutations.
#[derive(Debug)]
pub struct ErrorStore {
    /// Locked internals shared with subscriptions.
    inner: Arc<Mutex<Inner>>,
    /// Id generator for reports lacking one.
    ids: IdFactory,
}

impl Default for ErrorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Inner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inner")
            .field("snapshot", &self.snapshot)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ErrorStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                snapshot: Arc::new(ErrorBuckets::empty()),
                listeners: Vec::new(),
                next_listener_id: 0,
            })),
            ids: IdFactory::new(),
        }
    }

    /// Registers a change listener.
    ///
    /// The listener fires synchronously after every effective mutation until
    /// the returned [`Subscription`] is dropped.
    #[must_use]
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        let mut guard = lock_inner(&self.inner);
        guard.next_listener_id += 1;
        let id = guard.next_listener_id;
        guard.listeners.push(ListenerEntry {
            id,
            callback: Arc::new(listener),
        });
        Subscription {
            inner: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Returns the current frozen snapshot.
    ///
    /// Repeated calls between mutations return the same reference, so
    /// consumers can detect change with `Arc::ptr_eq`.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ErrorBuckets> {
        Arc::clone(&lock_inner(&self.inner).snapshot)
    }

    /// Installs a new list for one bucket.
    ///
    /// Ids are assigned to reports lacking one; present ids are preserved.
    /// A list equal to the current bucket by id sequence is a silent no-op.
    pub fn replace(&self, kind: ErrorKind, reports: Vec<ErrorReport>) {
        let items = self.assign_ids(reports);
        self.mutate(|current| {
            if ids_equal(current.bucket(kind), &items) {
                return None;
            }
            Some(current.with_bucket(kind, items.clone().into()))
        });
    }

    /// Replaces only the bucket subset matching `field`.
    ///
    /// Items scoped to other fields (or to none) are carried over untouched;
    /// the merged list is subject to the same id-sequence no-op rule.
    pub fn replace_partial(&self, kind: ErrorKind, reports: Vec<ErrorReport>, field: &str) {
        let replacement = self.assign_ids(reports);
        self.mutate(|current| {
            let mut merged: Vec<ErrorItem> = current
                .bucket(kind)
                .iter()
                .filter(|item| item.field.as_deref() != Some(field))
                .cloned()
                .collect();
            merged.extend(replacement.iter().cloned());
            if ids_equal(current.bucket(kind), &merged) {
                return None;
            }
            Some(current.with_bucket(kind, merged.into()))
        });
    }

    /// Appends reports to one bucket; an empty input is a silent no-op.
    pub fn push(&self, kind: ErrorKind, reports: Vec<ErrorReport>) {
        if reports.is_empty() {
            return;
        }
        let items = self.assign_ids(reports);
        self.mutate(|current| {
            let mut next: Vec<ErrorItem> = current.bucket(kind).to_vec();
            next.extend(items.iter().cloned());
            Some(current.with_bucket(kind, next.into()))
        });
    }

    /// Empties the given buckets; a no-op when they are already empty.
    pub fn clear(&self, kinds: &[ErrorKind]) {
        self.mutate(|current| {
            let mut next = current.clone();
            let mut changed = false;
            for kind in kinds {
                if !next.bucket(*kind).is_empty() {
                    next = next.with_bucket(*kind, Arc::from(Vec::new()));
                    changed = true;
                }
            }
            changed.then_some(next)
        });
    }

    /// Empties every bucket.
    pub fn clear_all(&self) {
        self.clear(&ErrorKind::ALL);
    }

    /// Removes matching items from the given buckets; a no-op when nothing
    /// matched.
    pub fn remove(&self, kinds: &[ErrorKind], matcher: &Matcher<'_>) {
        self.mutate(|current| {
            let mut next = current.clone();
            let mut changed = false;
            for kind in kinds {
                let bucket = next.bucket(*kind);
                let retained: Vec<ErrorItem> = bucket
                    .iter()
                    .filter(|item| !matcher.matches(item))
                    .cloned()
                    .collect();
                if retained.len() != bucket.len() {
                    next = next.with_bucket(*kind, retained.into());
                    changed = true;
                }
            }
            changed.then_some(next)
        });
    }

    /// Removes one item by id across the given buckets.
    pub fn remove_by_id(&self, kinds: &[ErrorKind], id: &ErrorId) {
        self.remove(kinds, &Matcher::Id(id));
    }

    /// Materializes reports into stored items, assigning missing ids.
    fn assign_ids(&self, reports: Vec<ErrorReport>) -> Vec<ErrorItem> {
        reports
            .into_iter()
            .map(|report| ErrorItem {
                id: report.id.unwrap_or_else(|| self.ids.next()),
                code: report.code,
                message: report.message,
                field: report.field,
                kind: report.kind,
            })
            .collect()
    }

    /// Applies a mutation and notifies listeners on effective change.
    ///
    /// Listeners run synchronously but outside the store lock, so a listener
    /// may call back into the store.
    fn mutate(&self, op: impl FnOnce(&ErrorBuckets) -> Option<ErrorBuckets>) {
        let mut guard = lock_inner(&self.inner);
        let Some(next) = op(&guard.snapshot) else {
            return;
        };
        guard.snapshot = Arc::new(next);
        let listeners: Vec<Listener> = guard
            .listeners
            .iter()
            .map(|entry| Arc::clone(&entry.callback))
            .collect();
        drop(guard);
        for listener in listeners {
            listener();
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Compares a stored bucket and a candidate list by id sequence.
fn ids_equal(current: &Arc<[ErrorItem]>, candidate: &[ErrorItem]) -> bool {
    current.len() == candidate.len()
        && current
            .iter()
            .zip(candidate.iter())
            .all(|(left, right)| left.id == right.id)
}
