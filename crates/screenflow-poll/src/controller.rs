// crates/screenflow-poll/src/controller.rs
// ============================================================================
// Module: Poll Controller
// Description: Cancellable long-poll loop for out-of-band approval.
// Purpose: Drive the push-MFA polling state machine with rate-limit backoff.
// Dependencies: screenflow-core, tokio
// ============================================================================

//! ## Overview
//! The controller drives `Idle -> Running -> {Completed, Errored, Cancelled}`
//! over an injected [`ChallengeProbe`]. At most one check is in flight per
//! controller at any time; ticks are sequenced by the loop itself. A
//! generation counter invalidates stale work: a check that resolves after
//! cancellation is a silent no-op, and `is_running` never reports `true`
//! once a terminal state has been reached. Dropping the controller cancels
//! the loop unconditionally so abandoned screens cannot orphan timers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use screenflow_core::ChallengeProbe;
use screenflow_core::ProbeFailure;
use screenflow_core::ProbeOutcome;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::telemetry::NoopObserver;
use crate::telemetry::PollObserver;
use crate::telemetry::PollTransition;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default inter-tick interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Polling configuration.
///
/// # Invariants
/// - `interval` is the minimum spacing between checks; rate-limit cooldowns
///   may stretch it but never shrink it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Inter-tick interval.
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

// ============================================================================
// SECTION: Poll State
// ============================================================================

/// Observable polling lifecycle state.
///
/// # Invariants
/// - `Running` is re-enterable from every terminal state via
///   [`PollController::start_polling`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// No polling has started yet.
    Idle,
    /// The loop is active.
    Running,
    /// Approval was granted.
    Completed,
    /// A check failed terminally.
    Errored,
    /// The owner cancelled the loop.
    Cancelled,
}

impl PollState {
    /// Encodes the state for atomic storage.
    const fn encode(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Running => 1,
            Self::Completed => 2,
            Self::Errored => 3,
            Self::Cancelled => 4,
        }
    }

    /// Decodes an atomically stored state.
    const fn decode(raw: u8) -> Self {
        match raw {
            1 => Self::Running,
            2 => Self::Completed,
            3 => Self::Errored,
            4 => Self::Cancelled,
            _ => Self::Idle,
        }
    }
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Callback invoked when approval is granted.
type CompletedFn = Box<dyn Fn() + Send + Sync>;

/// Callback invoked when a check fails terminally.
type ErrorFn = Box<dyn Fn(&ProbeFailure) + Send + Sync>;

/// Completion and error callbacks owned by the controller.
pub struct PollHandlers {
    /// Invoked once when the loop reaches `Completed`.
    on_completed: CompletedFn,
    /// Invoked once when the loop reaches `Errored`.
    on_error: ErrorFn,
}

impl PollHandlers {
    /// Creates handlers from the provided callbacks.
    #[must_use]
    pub fn new(
        on_completed: impl Fn() + Send + Sync + 'static,
        on_error: impl Fn(&ProbeFailure) + Send + Sync + 'static,
    ) -> Self {
        Self {
            on_completed: Box::new(on_completed),
            on_error: Box::new(on_error),
        }
    }

    /// Fires the completion callback.
    fn completed(&self) {
        (self.on_completed)();
    }

    /// Fires the error callback.
    fn errored(&self, failure: &ProbeFailure) {
        (self.on_error)(failure);
    }
}

impl std::fmt::Debug for PollHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollHandlers").finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Shared State
// ============================================================================

/// State shared between the controller handle and its loop task.
struct Shared {
    /// Encoded [`PollState`].
    state: AtomicU8,
    /// Generation counter; stale generations must not act.
    generation: AtomicU64,
    /// Active loop task, if any.
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Shared {
    /// Creates idle shared state.
    fn new() -> Self {
        Self {
            state: AtomicU8::new(PollState::Idle.encode()),
            generation: AtomicU64::new(0),
            task: Mutex::new(None),
        }
    }

    /// Returns the current state.
    fn state(&self) -> PollState {
        PollState::decode(self.state.load(Ordering::SeqCst))
    }

    /// Returns whether the given generation is still the live running loop.
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
            && self.state() == PollState::Running
    }

    /// Transitions the live loop to a terminal state.
    ///
    /// Returns `false` when the generation is stale or the loop was already
    /// stopped; callbacks must not fire in that case.
    fn finish(&self, generation: u64, terminal: PollState) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.state.store(terminal.encode(), Ordering::SeqCst);
        true
    }

    /// Locks the task slot, recovering from a poisoned mutex.
    fn lock_task(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        match self.task.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

// ============================================================================
// SECTION: Poll Controller
// ============================================================================

/// Cancellable long-poll controller for out-of-band approval.
///
/// # Invariants
/// - At most one check is in flight per controller at any time.
/// - Callbacks never fire after cancellation or after a terminal state.
pub struct PollController {
    /// Shared loop state.
    shared: Arc<Shared>,
    /// Injected check operation.
    probe: Arc<dyn ChallengeProbe>,
    /// Completion and error callbacks.
    handlers: Arc<PollHandlers>,
    /// Transition observer.
    observer: Arc<dyn PollObserver>,
    /// Polling configuration.
    config: PollConfig,
}

impl PollController {
    /// Creates a controller in the `Idle` state.
    #[must_use]
    pub fn new(config: PollConfig, probe: Arc<dyn ChallengeProbe>, handlers: PollHandlers) -> Self {
        Self {
            shared: Arc::new(Shared::new()),
            probe,
            handlers: Arc::new(handlers),
            observer: Arc::new(NoopObserver),
            config,
        }
    }

    /// Installs a transition observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn PollObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Starts the polling loop.
    ///
    /// No-op while already running. Must be called from within a tokio
    /// runtime; without one the call is a no-op as well, since there is no
    /// executor to drive the loop.
    pub fn start_polling(&self) {
        if self.shared.state() == PollState::Running {
            return;
        }
        let Ok(handle) = Handle::try_current() else {
            return;
        };
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.shared
            .state
            .store(PollState::Running.encode(), Ordering::SeqCst);
        self.observer.on_transition(PollTransition::Started);

        let task = handle.spawn(run_loop(
            Arc::clone(&self.shared),
            Arc::clone(&self.probe),
            Arc::clone(&self.handlers),
            Arc::clone(&self.observer),
            self.config.interval,
            generation,
        ));
        if let Some(previous) = self.shared.lock_task().replace(task) {
            previous.abort();
        }
    }

    /// Stops the polling loop and cancels any in-flight check.
    ///
    /// Idempotent: repeated calls are no-ops. A check that already resolved
    /// concurrently is silenced by the generation bump.
    pub fn stop_polling(&self) {
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        let cancelled = self
            .shared
            .state
            .compare_exchange(
                PollState::Running.encode(),
                PollState::Cancelled.encode(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok();
        if let Some(task) = self.shared.lock_task().take() {
            task.abort();
        }
        if cancelled {
            self.observer.on_transition(PollTransition::Cancelled);
        }
    }

    /// Returns whether the loop is currently running.
    ///
    /// Never reports `true` once a terminal state has been reached, even
    /// when the terminal transition happened asynchronously.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.state() == PollState::Running
    }

    /// Returns the observable lifecycle state.
    #[must_use]
    pub fn state(&self) -> PollState {
        self.shared.state()
    }
}

impl Drop for PollController {
    fn drop(&mut self) {
        self.stop_polling();
    }
}

impl std::fmt::Debug for PollController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollController")
            .field("state", &self.shared.state())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Loop Task
// ============================================================================

/// Runs the polling loop for one generation.
async fn run_loop(
    shared: Arc<Shared>,
    probe: Arc<dyn ChallengeProbe>,
    handlers: Arc<PollHandlers>,
    observer: Arc<dyn PollObserver>,
    interval: Duration,
    generation: u64,
) {
    loop {
        if !shared.is_current(generation) {
            return;
        }
        let outcome = probe.check().await;
        // A stop that raced the check must win: stale results are dropped.
        if !shared.is_current(generation) {
            return;
        }
        match outcome {
            ProbeOutcome::Approved => {
                if shared.finish(generation, PollState::Completed) {
                    observer.on_transition(PollTransition::Completed);
                    handlers.completed();
                }
                return;
            }
            ProbeOutcome::Failed(failure) => {
                if shared.finish(generation, PollState::Errored) {
                    observer.on_transition(PollTransition::Errored);
                    handlers.errored(&failure);
                }
                return;
            }
            ProbeOutcome::RateLimited { retry_after } => {
                observer.on_transition(PollTransition::RateLimited);
                let cooldown = retry_after
                    .filter(|suggested| *suggested > interval)
                    .unwrap_or(interval);
                tokio::time::sleep(cooldown).await;
            }
            ProbeOutcome::Pending => {
                observer.on_transition(PollTransition::Tick);
                tokio::time::sleep(interval).await;
            }
        }
    }
}
