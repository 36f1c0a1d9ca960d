//! Session runtime: owns the engine and the ledger, and manages the
//! tick/display driver pair.
//!
//! All mutation goes through the single engine mutex, so commands from
//! the dispatcher and ticks from the driver never interleave mid-update.
//! The display driver only ever reads a snapshot taken under that lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use studyclock_core::{
    ConfigOutcome, ConfigUpdate, Event, LedgerTotals, PeriodicDriver, RecordSink, SessionConfig,
    SessionLedger, SessionRecord, Tick, TimerEngine, TimerSnapshot, TimerState, TransitionError,
    TICK_CADENCE,
};

use crate::render;

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct DriverPair {
    tick: PeriodicDriver,
    display: PeriodicDriver,
}

pub struct SessionRuntime {
    engine: Arc<Mutex<TimerEngine>>,
    ledger: Arc<Mutex<SessionLedger>>,
    drivers: Option<DriverPair>,
    json_events: bool,
}

impl SessionRuntime {
    pub fn new(config: SessionConfig, json_events: bool) -> Self {
        let ledger = Arc::new(Mutex::new(SessionLedger::new()));
        let sink: Arc<Mutex<dyn RecordSink>> = ledger.clone();
        let engine = Arc::new(Mutex::new(TimerEngine::new(config, sink)));
        Self {
            engine,
            ledger,
            drivers: None,
            json_events,
        }
    }

    pub fn json_events(&self) -> bool {
        self.json_events
    }

    pub fn config(&self) -> SessionConfig {
        lock(&self.engine).config()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        lock(&self.engine).snapshot()
    }

    pub fn configure(&self, update: &ConfigUpdate) -> ConfigOutcome {
        lock(&self.engine).configure(update)
    }

    /// Start or resume; (re)spawns the driver pair when none is running.
    pub async fn start(&mut self) -> Result<Event, TransitionError> {
        let event = lock(&self.engine).start()?;
        if self.drivers.is_none() {
            self.spawn_drivers();
        }
        Ok(event)
    }

    /// Pause and tear both drivers down; a paused session has nothing to
    /// tick or display.
    pub async fn pause(&mut self) -> Result<Event, TransitionError> {
        let event = lock(&self.engine).pause()?;
        self.stop_drivers().await;
        Ok(event)
    }

    pub async fn stop(&mut self) -> Result<Event, TransitionError> {
        let event = lock(&self.engine).stop()?;
        self.stop_drivers().await;
        Ok(event)
    }

    pub fn summary(&self) -> (LedgerTotals, Vec<SessionRecord>) {
        let ledger = lock(&self.ledger);
        (ledger.aggregate(), ledger.recent(5).to_vec())
    }

    /// Cancel any running drivers before the final summary renders.
    pub async fn shutdown(&mut self) {
        self.stop_drivers().await;
    }

    #[cfg(test)]
    fn has_drivers(&self) -> bool {
        self.drivers.is_some()
    }

    fn spawn_drivers(&mut self) {
        let engine = Arc::clone(&self.engine);
        let ledger = Arc::clone(&self.ledger);
        let json_events = self.json_events;
        let tick = PeriodicDriver::spawn("tick", TICK_CADENCE, TICK_CADENCE, move || {
            let outcome = lock(&engine).tick();
            if let Tick::Completed {
                completed,
                next,
                at,
            } = outcome
            {
                let study_sessions = lock(&ledger).aggregate().completed_study_sessions;
                render::phase_completed(completed, next, study_sessions, at, json_events);
            }
        });

        let engine = Arc::clone(&self.engine);
        let display = PeriodicDriver::spawn("display", TICK_CADENCE, Duration::ZERO, move || {
            let snap = lock(&engine).snapshot();
            if snap.state == TimerState::Running {
                render::progress_line(&snap);
            }
        });

        self.drivers = Some(DriverPair { tick, display });
    }

    async fn stop_drivers(&mut self) {
        let Some(DriverPair { tick, display }) = self.drivers.take() else {
            return;
        };
        for result in [tick.stop().await, display.stop().await] {
            if let Err(e) = result {
                eprintln!("warning: {e}");
            }
        }
    }
}
