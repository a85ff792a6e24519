// crates/screenflow-core/src/interfaces/mod.rs
// ============================================================================
// Module: Screenflow Interfaces
// Description: Backend-agnostic interfaces for submission and approval checks.
// Purpose: Define the contract surfaces consumed by screen adapters and the
//          polling controller without embedding transport details.
// Dependencies: async-trait, serde, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the engine integrates with the host's network layer
//! without inspecting response bodies. Submission is an opaque
//! fire-and-forget contract; the challenge probe is the only place a
//! response shape is interpreted, and only into a four-way outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Form Submission
// ============================================================================

/// Submission errors surfaced by the network layer.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Transport-level failure before a response was received.
    #[error("submission transport failure: {0}")]
    Transport(String),
    /// The server rejected the submission.
    #[error("submission rejected ({status}): {message}")]
    Rejected {
        /// HTTP-equivalent status code.
        status: u16,
        /// Server-provided rejection message.
        message: String,
    },
}

/// Opaque form submission contract.
///
/// The engine never inspects a response body; success or failure is the
/// entire observable outcome.
#[async_trait]
pub trait FormSubmitter: Send + Sync {
    /// Submits a key/value form payload.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] when the submission cannot be delivered or is
    /// rejected by the server.
    async fn submit(&self, data: &BTreeMap<String, String>) -> Result<(), SubmitError>;
}

// ============================================================================
// SECTION: Challenge Probe
// ============================================================================

/// Structured failure carried by a terminal probe outcome.
///
/// # Invariants
/// - `status` is the HTTP-equivalent status code; `0` means no response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeFailure {
    /// HTTP-equivalent status code.
    pub status: u16,
    /// Raw response text accompanying the failure.
    pub response_text: String,
}

impl ProbeFailure {
    /// Creates a probe failure with the provided status and response text.
    #[must_use]
    pub fn new(status: u16, response_text: impl Into<String>) -> Self {
        Self {
            status,
            response_text: response_text.into(),
        }
    }
}

/// Four-way outcome of one out-of-band approval check.
///
/// # Invariants
/// - The probe is total: transport failures surface as
///   [`ProbeOutcome::Failed`], never as panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The out-of-band approval was granted.
    Approved,
    /// No terminal condition yet; keep polling.
    Pending,
    /// The endpoint is rate limiting; suspend until the cooldown elapses.
    RateLimited {
        /// Server-suggested cooldown before the next check.
        retry_after: Option<Duration>,
    },
    /// The check failed terminally.
    Failed(ProbeFailure),
}

/// One out-of-band approval check per call.
#[async_trait]
pub trait ChallengeProbe: Send + Sync {
    /// Performs a single external query and classifies the response.
    async fn check(&self) -> ProbeOutcome;
}
