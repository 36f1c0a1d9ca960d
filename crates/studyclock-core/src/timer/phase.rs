use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Study,
    Break,
}

impl PhaseKind {
    /// The phase that auto-starts when this one completes.
    pub fn opposite(self) -> Self {
        match self {
            PhaseKind::Study => PhaseKind::Break,
            PhaseKind::Break => PhaseKind::Study,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PhaseKind::Study => "Study",
            PhaseKind::Break => "Break",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Requested changes to a [`SessionConfig`]. `None` leaves a field alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub study_minutes: Option<u32>,
    pub break_minutes: Option<u32>,
}

/// Study/break durations, in whole minutes.
///
/// Fields change only through [`SessionConfig::apply`], which validates
/// each field independently; a rejected field keeps its prior value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    study_minutes: u32,
    break_minutes: u32,
}

impl SessionConfig {
    pub const STUDY_MINUTES: RangeInclusive<u32> = 1..=120;
    pub const BREAK_MINUTES: RangeInclusive<u32> = 1..=30;

    pub fn study_minutes(&self) -> u32 {
        self.study_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    pub fn study_secs(&self) -> u64 {
        u64::from(self.study_minutes) * 60
    }

    pub fn break_secs(&self) -> u64 {
        u64::from(self.break_minutes) * 60
    }

    pub fn duration_secs(&self, phase: PhaseKind) -> u64 {
        match phase {
            PhaseKind::Study => self.study_secs(),
            PhaseKind::Break => self.break_secs(),
        }
    }

    /// Apply an update field by field.
    ///
    /// Each provided value is validated against its bound; out-of-range
    /// values are returned as rejections and the field is left unchanged.
    pub fn apply(&mut self, update: &ConfigUpdate) -> Vec<ValidationError> {
        let mut rejected = Vec::new();

        if let Some(minutes) = update.study_minutes {
            if Self::STUDY_MINUTES.contains(&minutes) {
                self.study_minutes = minutes;
            } else {
                rejected.push(ValidationError::OutOfRange {
                    field: "study",
                    value: minutes,
                    min: *Self::STUDY_MINUTES.start(),
                    max: *Self::STUDY_MINUTES.end(),
                });
            }
        }

        if let Some(minutes) = update.break_minutes {
            if Self::BREAK_MINUTES.contains(&minutes) {
                self.break_minutes = minutes;
            } else {
                rejected.push(ValidationError::OutOfRange {
                    field: "break",
                    value: minutes,
                    min: *Self::BREAK_MINUTES.start(),
                    max: *Self::BREAK_MINUTES.end(),
                });
            }
        }

        rejected
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            study_minutes: 25,
            break_minutes: 5,
        }
    }
}
