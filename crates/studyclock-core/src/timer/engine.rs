//! Timer engine implementation.
//!
//! The engine is a logical-second state machine. It does not own a clock
//! or a thread - an external cadence calls `tick()` once per second and
//! each call advances the active phase by exactly one second.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Running(Study) -> Paused -> Running -> ... -> Idle
//!                 \-- tick() to zero --> Running(opposite phase)
//! ```
//!
//! Completed phases are appended to an injected [`RecordSink`]; stopping
//! early discards the phase without a record.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::phase::{ConfigUpdate, PhaseKind, SessionConfig};
use crate::error::{TransitionError, ValidationError};
use crate::events::Event;
use crate::ledger::{RecordSink, SessionRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Result of one `tick()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No active phase; nothing advanced.
    Idle,
    Ongoing {
        remaining_secs: u64,
    },
    /// The active phase ran down to zero; the opposite phase has begun.
    Completed {
        completed: PhaseKind,
        next: PhaseKind,
        at: DateTime<Utc>,
    },
}

/// Immutable point-in-time copy of the timer state, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub phase: PhaseKind,
    pub remaining_secs: u64,
    pub total_secs: u64,
    /// floor(100 * elapsed / total); 0 while idle.
    pub progress_percent: u8,
    pub started_at: Option<DateTime<Utc>>,
    pub at: DateTime<Utc>,
}

/// Core timer state machine.
///
/// Invariant: `remaining_secs <= total_secs`, and both are zero while
/// idle. Config changes never resize the phase in flight - `total_secs`
/// is captured when the phase starts.
pub struct TimerEngine {
    config: SessionConfig,
    state: TimerState,
    phase: PhaseKind,
    remaining_secs: u64,
    total_secs: u64,
    phase_started_at: Option<DateTime<Utc>>,
    sink: Arc<Mutex<dyn RecordSink>>,
}

/// Result of a configure call: the config now in effect plus any
/// rejected fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOutcome {
    pub config: SessionConfig,
    pub rejected: Vec<ValidationError>,
}

impl TimerEngine {
    /// Create an idle engine.
    ///
    /// Completed phases are appended through `sink`; the engine never
    /// reads the ledger back.
    pub fn new(config: SessionConfig, sink: Arc<Mutex<dyn RecordSink>>) -> Self {
        Self {
            config,
            state: TimerState::Idle,
            phase: PhaseKind::Study,
            remaining_secs: 0,
            total_secs: 0,
            phase_started_at: None,
            sink,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> PhaseKind {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Read-only, side-effect-free copy for rendering.
    pub fn snapshot(&self) -> TimerSnapshot {
        let progress_percent = if self.total_secs == 0 {
            0
        } else {
            (100 * (self.total_secs - self.remaining_secs) / self.total_secs) as u8
        };
        TimerSnapshot {
            state: self.state,
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            progress_percent,
            started_at: self.phase_started_at,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Idle: begin a fresh Study phase. Paused: resume the current phase
    /// with remaining time unchanged.
    pub fn start(&mut self) -> Result<Event, TransitionError> {
        match self.state {
            TimerState::Running => Err(TransitionError::AlreadyRunning),
            TimerState::Paused => {
                self.state = TimerState::Running;
                Ok(Event::PhaseResumed {
                    phase: self.phase,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Idle => {
                let now = Utc::now();
                self.phase = PhaseKind::Study;
                self.total_secs = self.config.study_secs();
                self.remaining_secs = self.total_secs;
                self.phase_started_at = Some(now);
                self.state = TimerState::Running;
                Ok(Event::PhaseStarted {
                    phase: self.phase,
                    duration_secs: self.total_secs,
                    at: now,
                })
            }
        }
    }

    /// Suspend the running phase without altering remaining time.
    pub fn pause(&mut self) -> Result<Event, TransitionError> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Ok(Event::PhasePaused {
                    phase: self.phase,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Paused => Err(TransitionError::AlreadyPaused),
            TimerState::Idle => Err(TransitionError::NoActiveSession),
        }
    }

    /// Discard the active phase and return to idle. No record is written.
    pub fn stop(&mut self) -> Result<Event, TransitionError> {
        match self.state {
            TimerState::Idle => Err(TransitionError::NoActiveSession),
            TimerState::Running | TimerState::Paused => {
                let remaining = self.remaining_secs;
                self.state = TimerState::Idle;
                self.remaining_secs = 0;
                self.total_secs = 0;
                self.phase_started_at = None;
                Ok(Event::SessionStopped {
                    phase: self.phase,
                    remaining_secs: remaining,
                    at: Utc::now(),
                })
            }
        }
    }

    /// Advance the active phase by one logical second.
    ///
    /// On reaching zero, appends a record for the finished phase and
    /// immediately begins the opposite phase at its currently configured
    /// duration. Idle and paused engines ignore ticks.
    pub fn tick(&mut self) -> Tick {
        if self.state != TimerState::Running {
            return Tick::Idle;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return Tick::Ongoing {
                remaining_secs: self.remaining_secs,
            };
        }

        let completed = self.phase;
        let now = Utc::now();
        let record = SessionRecord {
            phase: completed,
            started_at: self.phase_started_at.unwrap_or(now),
            ended_at: now,
            duration_min: self.total_secs / 60,
        };
        // A poisoned ledger lock drops the record; the tick driver keeps going.
        if let Ok(mut sink) = self.sink.lock() {
            sink.append_record(record);
        }

        let next = completed.opposite();
        self.phase = next;
        self.total_secs = self.config.duration_secs(next);
        self.remaining_secs = self.total_secs;
        self.phase_started_at = Some(now);

        Tick::Completed {
            completed,
            next,
            at: now,
        }
    }

    /// Update the session configuration field by field.
    ///
    /// Rejected fields keep their prior value. A phase already in flight
    /// keeps the duration it started with.
    pub fn configure(&mut self, update: &ConfigUpdate) -> ConfigOutcome {
        let rejected = self.config.apply(update);
        ConfigOutcome {
            config: self.config,
            rejected,
        }
    }
}
