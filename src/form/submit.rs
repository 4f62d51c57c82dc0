//! Submission Handler - Validity-gated submit with a simulated network call.
//!
//! State machine: `Idle -> Submitting -> Succeeded`, with `Idle -> Submitting
//! -> Idle` reserved for failures (no failure path is modeled; the simulated
//! call always succeeds). `Succeeded` is terminal until the form is reset or
//! resubmitted.
//!
//! The simulated call is a local timer only: `submit` records a deadline and
//! the event loop polls `tick` until it passes. The loop stays free to
//! process edits while submitting, but `submit` refuses re-entry so no two
//! submissions overlap. There is no cancellation - a started submission
//! always completes.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde_json::Value;
use spark_signals::{signal, Signal};

use crate::form::Form;

// =============================================================================
// STATE
// =============================================================================

/// Lifecycle of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
}

// =============================================================================
// SINK
// =============================================================================

/// Observability collaborator: receives the validated payload once the
/// simulated call completes. Fire-and-forget; there is no response contract.
pub trait SubmissionSink {
    fn record(&self, payload: &Value);
}

/// Default sink: structured log of the submitted payload.
pub struct TracingSink;

impl SubmissionSink for TracingSink {
    fn record(&self, payload: &Value) {
        tracing::info!(%payload, "form submitted");
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Drives submission for one form.
pub struct SubmissionController {
    form: Form,
    state: Signal<SubmissionState>,
    deadline: Rc<Cell<Option<Instant>>>,
    delay: Duration,
    sink: Rc<dyn SubmissionSink>,
}

impl SubmissionController {
    /// Controller with the default tracing sink.
    pub fn new(form: Form, delay: Duration) -> SubmissionController {
        SubmissionController::with_sink(form, delay, Rc::new(TracingSink))
    }

    /// Controller recording to a caller-supplied sink.
    pub fn with_sink(
        form: Form,
        delay: Duration,
        sink: Rc<dyn SubmissionSink>,
    ) -> SubmissionController {
        SubmissionController {
            form,
            state: signal(SubmissionState::Idle),
            deadline: Rc::new(Cell::new(None)),
            delay,
            sink,
        }
    }

    /// Current state. Reactive inside effects/deriveds.
    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    pub fn is_submitting(&self) -> bool {
        self.state() == SubmissionState::Submitting
    }

    pub fn is_succeeded(&self) -> bool {
        self.state() == SubmissionState::Succeeded
    }

    /// Attempt a submit.
    ///
    /// Re-validates every registered field first; any violation keeps the
    /// state at `Idle` (errors are now visible in the ErrorMap) and returns
    /// false. Re-entry while `Submitting` also returns false. On success the
    /// state moves to `Submitting` until the deadline passes.
    pub fn submit(&self) -> bool {
        if self.is_submitting() {
            tracing::debug!("submit ignored: already submitting");
            return false;
        }

        if !self.form.trigger(None) {
            tracing::debug!(errors = self.form.error_count(), "submit blocked by validation");
            return false;
        }

        self.deadline.set(Some(Instant::now() + self.delay));
        self.state.set(SubmissionState::Submitting);
        tracing::info!(delay_ms = self.delay.as_millis() as u64, "submission started");
        true
    }

    /// Poll the simulated call. Returns true when the submission completed
    /// on this tick.
    pub fn tick(&self, now: Instant) -> bool {
        if !self.is_submitting() {
            return false;
        }
        let Some(deadline) = self.deadline.get() else {
            return false;
        };
        if now < deadline {
            return false;
        }

        self.deadline.set(None);
        self.sink.record(&self.form.watch());
        self.state.set(SubmissionState::Succeeded);
        true
    }

    /// Reset the form to defaults and return to `Idle` (hides the success
    /// banner).
    pub fn reset(&self) {
        self.form.reset();
        self.deadline.set(None);
        self.state.set(SubmissionState::Idle);
    }
}

// =============================================================================
// TESTS
// =============================================================================
