//! Debounced diagnostics scheduling.
//!
//! [`DiagnosticScheduler`] keeps the published [`MarkerSet`] consistent with a rapidly changing
//! [`SourceBuffer`]:
//!
//! - every buffer mutation calls [`DiagnosticScheduler::notify_edit`], which (re)starts a quiet
//!   period;
//! - once the quiet period has elapsed, [`DiagnosticScheduler::poll`] sends one
//!   [`DiagnosticsRequest`] tagged with the buffer's current [`Generation`];
//! - a [`DiagnosticsResponse`] is applied only if its generation is still the buffer's
//!   generation. Anything older is dropped, never merged.
//!
//! The scheduler is runtime-agnostic: time comes from an injected [`Clock`] and requests travel
//! through an injected [`DiagnosticsDispatcher`], so tests can drive it with a [`ManualClock`]
//! and an in-memory queue.

use crate::error::OracleError;
use crate::oracle::OracleOutcome;
use mingo_editor_core::{Generation, MarkerSet, SourceBuffer};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// A source of the current time.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Start at the current instant.
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A diagnostics request for one buffer snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsRequest {
    /// Buffer generation the snapshot was taken at.
    pub generation: Generation,
    /// Full buffer text.
    pub source: String,
}

/// The oracle's answer to a [`DiagnosticsRequest`], carrying the request's generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsResponse {
    /// Generation of the originating request.
    pub generation: Generation,
    /// Oracle result.
    pub outcome: OracleOutcome,
}

/// Transport between the scheduler and an oracle.
///
/// `dispatch` must not block on the oracle; responses are collected later via `try_recv`.
pub trait DiagnosticsDispatcher {
    /// Hand a request to the oracle.
    fn dispatch(&mut self, request: DiagnosticsRequest) -> Result<(), OracleError>;

    /// Take the next available response without blocking.
    fn try_recv(&mut self) -> Option<DiagnosticsResponse>;
}

/// What happened during a [`DiagnosticScheduler::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerEvent {
    /// A request was sent for this generation.
    Dispatched(Generation),
    /// A response replaced the published marker set.
    Published(Generation),
    /// The oracle was unavailable; the previous marker set was kept.
    Unavailable(Generation),
    /// A response arrived for a superseded generation and was dropped.
    Discarded(Generation),
}

/// Debounce timer plus generation check for diagnostics requests.
#[derive(Debug)]
pub struct DiagnosticScheduler<C: Clock = SystemClock> {
    clock: C,
    quiet_period: Duration,
    due: Option<Instant>,
    in_flight: Option<Generation>,
    accepted: Option<Generation>,
    markers: MarkerSet,
}

impl<C: Clock> DiagnosticScheduler<C> {
    /// Create a scheduler with the given quiet period.
    pub fn new(quiet_period: Duration, clock: C) -> Self {
        Self {
            clock,
            quiet_period,
            due: None,
            in_flight: None,
            accepted: None,
            markers: MarkerSet::default(),
        }
    }

    /// The configured quiet period.
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Restart the quiet period. Call after every buffer mutation.
    pub fn notify_edit(&mut self) {
        self.due = Some(self.clock.now() + self.quiet_period);
        trace!(quiet_ms = self.quiet_period.as_millis() as u64, "diagnostics scheduled");
    }

    /// Returns `true` while a quiet period is running.
    pub fn is_scheduled(&self) -> bool {
        self.due.is_some()
    }

    /// Generation of the request currently considered live, if any.
    pub fn in_flight(&self) -> Option<Generation> {
        self.in_flight
    }

    /// The last published marker set (possibly for an older generation).
    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// The published marker set, only if it was computed for `generation`.
    pub fn markers_for(&self, generation: Generation) -> Option<&MarkerSet> {
        (self.accepted == Some(generation)).then_some(&self.markers)
    }

    /// Dispatch a request if the quiet period has elapsed, then collect responses.
    ///
    /// A failed dispatch returns before any response is taken from the dispatcher, and stays
    /// due so the next poll retries it.
    pub fn poll<D>(
        &mut self,
        buffer: &SourceBuffer,
        dispatcher: &mut D,
    ) -> Result<Vec<SchedulerEvent>, OracleError>
    where
        D: DiagnosticsDispatcher + ?Sized,
    {
        let mut events = Vec::new();
        if let Some(generation) = self.maybe_dispatch(buffer, dispatcher)? {
            events.push(SchedulerEvent::Dispatched(generation));
        }

        while let Some(response) = dispatcher.try_recv() {
            events.push(self.accept(buffer.generation(), response));
        }
        Ok(events)
    }

    /// Apply `response` if it belongs to `current`, the buffer's generation right now.
    pub fn accept(
        &mut self,
        current: Generation,
        response: DiagnosticsResponse,
    ) -> SchedulerEvent {
        let generation = response.generation;
        if self.in_flight == Some(generation) {
            self.in_flight = None;
        }

        if generation != current || self.accepted == Some(generation) {
            debug!(%generation, %current, "discarding stale diagnostics");
            return SchedulerEvent::Discarded(generation);
        }

        match response.outcome {
            OracleOutcome::Records(records) => {
                self.markers = MarkerSet::from_records(generation, &records);
                debug!(%generation, markers = self.markers.len(), "diagnostics published");
            }
            OracleOutcome::Failed { error } => {
                warn!(%generation, %error, "diagnostics oracle output unusable");
                self.markers = MarkerSet::failed(generation, error);
            }
            OracleOutcome::Unavailable => {
                debug!(%generation, "diagnostics oracle unavailable; keeping previous markers");
                return SchedulerEvent::Unavailable(generation);
            }
        }
        self.accepted = Some(generation);
        SchedulerEvent::Published(generation)
    }

    fn maybe_dispatch<D>(
        &mut self,
        buffer: &SourceBuffer,
        dispatcher: &mut D,
    ) -> Result<Option<Generation>, OracleError>
    where
        D: DiagnosticsDispatcher + ?Sized,
    {
        let Some(due) = self.due else {
            return Ok(None);
        };
        if self.clock.now() < due {
            return Ok(None);
        }

        let generation = buffer.generation();
        if self.accepted == Some(generation) {
            self.due = None;
            trace!(%generation, "diagnostics already current");
            return Ok(None);
        }

        dispatcher.dispatch(DiagnosticsRequest {
            generation,
            source: buffer.text(),
        })?;
        self.due = None;
        self.in_flight = Some(generation);
        debug!(%generation, "diagnostics requested");
        Ok(Some(generation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let start = clock.now();
        other.advance(Duration::from_millis(5));
        assert_eq!(clock.now() - start, Duration::from_millis(5));
    }

    #[test]
    fn test_accept_ignores_duplicate_responses_for_a_generation() {
        let mut scheduler = DiagnosticScheduler::new(Duration::ZERO, ManualClock::new());
        let generation = Generation::new(3);
        let response = DiagnosticsResponse {
            generation,
            outcome: OracleOutcome::Records(Vec::new()),
        };

        assert_eq!(
            scheduler.accept(generation, response.clone()),
            SchedulerEvent::Published(generation)
        );
        assert_eq!(
            scheduler.accept(generation, response),
            SchedulerEvent::Discarded(generation)
        );
    }
}
