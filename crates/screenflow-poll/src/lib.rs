// crates/screenflow-poll/src/lib.rs
// ============================================================================
// Module: Screenflow Poll
// Description: Push-MFA polling controller with rate-limit backoff.
// Purpose: Discover out-of-band approval through a cancellable timer loop.
// Dependencies: screenflow-core, tokio
// ============================================================================

//! ## Overview
//! This crate drives the push-MFA long poll: a cooperative timer loop over
//! an injected [`screenflow_core::ChallengeProbe`], with externally
//! observable running state, rate-limit cooldown, and silent cancellation.
//! Screen adapters own one [`PollController`] per push screen and must stop
//! it on teardown; dropping the controller stops it as a backstop.

/// Polling state machine and controller.
pub mod controller;
/// Transition observer hooks.
pub mod telemetry;

pub use controller::DEFAULT_POLL_INTERVAL;
pub use controller::PollConfig;
pub use controller::PollController;
pub use controller::PollHandlers;
pub use controller::PollState;
pub use telemetry::NoopObserver;
pub use telemetry::PollObserver;
pub use telemetry::PollTransition;
