use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::PhaseKind;

/// Every state change in the timer produces an Event.
/// The dispatcher renders them; in JSON mode they are emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PhaseStarted {
        phase: PhaseKind,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseResumed {
        phase: PhaseKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PhasePaused {
        phase: PhaseKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A phase ran down to zero and the opposite phase auto-started.
    PhaseCompleted {
        completed: PhaseKind,
        next: PhaseKind,
        at: DateTime<Utc>,
    },
    /// The session was stopped early; nothing was recorded.
    SessionStopped {
        phase: PhaseKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::PhaseCompleted {
            completed: PhaseKind::Study,
            next: PhaseKind::Break,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "phase_completed");
        assert_eq!(json["completed"], "study");
        assert_eq!(json["next"], "break");
    }
}
