//! # Studyclock Core Library
//!
//! Core logic for Studyclock, an interactive Pomodoro-style study timer.
//! The library owns the phase state machine and the session history; the
//! CLI binary is a thin dispatcher and renderer over it.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a logical-second state machine. An external 1 Hz
//!   cadence calls `tick()`; the engine decrements remaining time and
//!   auto-starts the opposite phase when a phase runs down to zero.
//! - **Session Ledger**: an append-only in-memory record of completed
//!   phases, written by the engine through an injected sink and read by
//!   the application for summary reporting.
//! - **Drivers**: cancellable tokio tasks that provide the tick and
//!   display cadences, with a bounded shutdown wait.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: the state machine
//! - [`SessionLedger`]: session history and aggregates
//! - [`PeriodicDriver`]: fixed-cadence task with bounded shutdown
//! - [`Event`]: state-change events for the dispatcher to render

pub mod driver;
pub mod error;
pub mod events;
pub mod ledger;
pub mod timer;

pub use driver::{PeriodicDriver, SHUTDOWN_GRACE, TICK_CADENCE};
pub use error::{ShutdownError, TransitionError, ValidationError};
pub use events::Event;
pub use ledger::{LedgerTotals, RecordSink, SessionLedger, SessionRecord};
pub use timer::{
    ConfigOutcome, ConfigUpdate, PhaseKind, SessionConfig, Tick, TimerEngine, TimerSnapshot,
    TimerState,
};
