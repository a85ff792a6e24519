// crates/screenflow-store/src/lib.rs
// ============================================================================
// Module: Screenflow Store
// Description: Classified, observable error store for screen runtimes.
// Purpose: Hold in-flight errors in frozen snapshots with change listeners.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! This crate is the pub/sub error surface of the screen runtime. Errors are
//! classified into `server`, `client`, and `developer` buckets; consumers
//! read frozen [`ErrorBuckets`] snapshots and subscribe for change
//! notifications. Mutations that would not change any bucket by id sequence
//! are suppressed, so re-rendering consumers are never woken spuriously.

/// Error records and producer reports.
pub mod item;
/// The observable store.
pub mod store;

pub use item::ErrorId;
pub use item::ErrorItem;
pub use item::ErrorKind;
pub use item::ErrorReport;
pub use store::ErrorBuckets;
pub use store::ErrorStore;
pub use store::Matcher;
pub use store::Subscription;
