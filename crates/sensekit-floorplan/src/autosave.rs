//! Debounced auto-save state machine.
//!
//! Every dirtying edit on an already-persisted plan (re)arms a single
//! debounce deadline; only one deadline is outstanding per store. The
//! clock is injected so tests advance virtual time instead of sleeping.
//!
//! States: `Idle -> Pending -> Saving -> {Saved | Error}`. Failures keep
//! the dirty flag set so the next edit or a manual save retries; there
//! is no automatic retry beyond that.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use sensekit_core::constants::AUTOSAVE_DEBOUNCE_MS;

/// Source of monotonic time for the debounce deadline.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock used outside of tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic debounce tests.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset_ms: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset_ms: AtomicU64::new(0),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, duration: Duration) {
        self.offset_ms
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
    }
}

/// Observable auto-save state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoSaveStatus {
    /// No save pending.
    Idle,
    /// An edit armed the debounce timer.
    Pending,
    /// The debounce fired; a write is in flight.
    Saving,
    /// Last cycle persisted (or skipped an unchanged payload).
    Saved,
    /// Last cycle failed; the dirty flag is kept for retry.
    Error,
}

/// Debounce bookkeeping owned by the editor.
#[derive(Debug)]
pub(crate) struct AutoSave {
    pub enabled: bool,
    pub status: AutoSaveStatus,
    deadline: Option<Instant>,
    /// Serialized form of the last successfully saved document, used to
    /// skip writes when nothing changed.
    pub last_payload: Option<String>,
}

impl AutoSave {
    pub fn new() -> Self {
        Self {
            enabled: true,
            status: AutoSaveStatus::Idle,
            deadline: None,
            last_payload: None,
        }
    }

    /// (Re)arms the debounce deadline. Any earlier deadline is replaced.
    pub fn schedule(&mut self, now: Instant) {
        self.status = AutoSaveStatus::Pending;
        self.deadline = Some(now + Duration::from_millis(AUTOSAVE_DEBOUNCE_MS));
    }

    /// Cancels a pending deadline, e.g. when auto-save is disabled or the
    /// store is replaced. A completed status is left as-is.
    pub fn cancel(&mut self) {
        self.deadline = None;
        if self.status == AutoSaveStatus::Pending {
            self.status = AutoSaveStatus::Idle;
        }
    }

    /// True when a pending deadline has elapsed.
    pub fn due(&self, now: Instant) -> bool {
        self.status == AutoSaveStatus::Pending
            && self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Marks the cycle in flight.
    pub fn begin(&mut self) {
        self.status = AutoSaveStatus::Saving;
        self.deadline = None;
    }

    /// Records a successful save (or skip) and its payload.
    pub fn complete(&mut self, payload: String) {
        self.status = AutoSaveStatus::Saved;
        self.deadline = None;
        self.last_payload = Some(payload);
    }

    /// Records a failed cycle. The payload is kept: the document on disk
    /// has not changed.
    pub fn fail(&mut self) {
        self.status = AutoSaveStatus::Error;
    }

    /// Forgets everything about the previous document.
    pub fn reset(&mut self) {
        self.status = AutoSaveStatus::Idle;
        self.deadline = None;
        self.last_payload = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_restarts_the_deadline() {
        let clock = ManualClock::new();
        let mut autosave = AutoSave::new();

        autosave.schedule(clock.now());
        clock.advance(Duration::from_millis(1_500));
        assert!(!autosave.due(clock.now()));

        // A second edit restarts the quiet period.
        autosave.schedule(clock.now());
        clock.advance(Duration::from_millis(1_500));
        assert!(!autosave.due(clock.now()));

        clock.advance(Duration::from_millis(500));
        assert!(autosave.due(clock.now()));
    }

    #[test]
    fn cancel_clears_pending_state() {
        let clock = ManualClock::new();
        let mut autosave = AutoSave::new();
        autosave.schedule(clock.now());
        autosave.cancel();
        assert_eq!(autosave.status, AutoSaveStatus::Idle);
        clock.advance(Duration::from_millis(5_000));
        assert!(!autosave.due(clock.now()));
    }

    #[test]
    fn lifecycle_states() {
        let clock = ManualClock::new();
        let mut autosave = AutoSave::new();
        autosave.schedule(clock.now());
        clock.advance(Duration::from_millis(2_000));
        assert!(autosave.due(clock.now()));

        autosave.begin();
        assert_eq!(autosave.status, AutoSaveStatus::Saving);
        assert!(!autosave.due(clock.now()));

        autosave.complete("{}".to_string());
        assert_eq!(autosave.status, AutoSaveStatus::Saved);
        assert_eq!(autosave.last_payload.as_deref(), Some("{}"));
    }
}
