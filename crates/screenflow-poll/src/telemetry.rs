// crates/screenflow-poll/src/telemetry.rs
// ============================================================================
// Module: Poll Telemetry
// Description: Observability hooks for polling state transitions.
// Purpose: Provide transition events without hard metric dependencies.
// Dependencies: none
// ============================================================================

//! ## Overview
//! This module exposes a thin observer interface for polling transitions.
//! It is intentionally dependency-light so hosts can plug in their metrics
//! stack without redesign. The controller installs [`NoopObserver`] unless
//! told otherwise.

// ============================================================================
// SECTION: Transitions
// ============================================================================

/// Polling state transition reported to observers.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollTransition {
    /// Polling started.
    Started,
    /// A check resolved pending; the loop sleeps one interval.
    Tick,
    /// A check was rate limited; the loop sleeps through the cooldown.
    RateLimited,
    /// Approval was granted; the loop reached `Completed`.
    Completed,
    /// A check failed terminally; the loop reached `Errored`.
    Errored,
    /// Polling was cancelled by the owner.
    Cancelled,
}

impl PollTransition {
    /// Returns a stable label for the transition.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Tick => "tick",
            Self::RateLimited => "rate_limited",
            Self::Completed => "completed",
            Self::Errored => "errored",
            Self::Cancelled => "cancelled",
        }
    }
}

// ============================================================================
// SECTION: Observer
// ============================================================================

/// Observer notified of every polling transition.
pub trait PollObserver: Send + Sync {
    /// Receives one transition event.
    fn on_transition(&self, transition: PollTransition);
}

/// Observer that ignores every transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PollObserver for NoopObserver {
    fn on_transition(&self, _transition: PollTransition) {}
}
