mod engine;
mod phase;

pub use engine::{ConfigOutcome, Tick, TimerEngine, TimerSnapshot, TimerState};
pub use phase::{ConfigUpdate, PhaseKind, SessionConfig};
