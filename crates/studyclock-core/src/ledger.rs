//! In-memory session history.
//!
//! The ledger is an append-only, insertion-ordered record of *completed*
//! phases. Stopping a phase early never produces a record. The ledger
//! lives for the process lifetime; there is no durable storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::PhaseKind;

/// One completed phase. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub phase: PhaseKind,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_min: u64,
}

/// Aggregate view over the whole ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub completed_study_sessions: u64,
    pub total_study_min: u64,
    pub total_break_min: u64,
    pub total_records: u64,
}

/// Write-only seam between the timer engine and the ledger.
///
/// The engine appends through this trait instead of owning the ledger,
/// so the ledger's owner keeps the read side to itself.
pub trait RecordSink: Send {
    fn append_record(&mut self, record: SessionRecord);
}

/// Append-only ordered sequence of [`SessionRecord`]s.
#[derive(Debug, Default)]
pub struct SessionLedger {
    records: Vec<SessionRecord>,
}

impl SessionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    /// Single pass over all records.
    pub fn aggregate(&self) -> LedgerTotals {
        let mut totals = LedgerTotals::default();
        for record in &self.records {
            totals.total_records += 1;
            match record.phase {
                PhaseKind::Study => {
                    totals.completed_study_sessions += 1;
                    totals.total_study_min += record.duration_min;
                }
                PhaseKind::Break => {
                    totals.total_break_min += record.duration_min;
                }
            }
        }
        totals
    }

    /// The last `min(n, len)` records in chronological order.
    pub fn recent(&self, n: usize) -> &[SessionRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }
}

impl RecordSink for SessionLedger {
    fn append_record(&mut self, record: SessionRecord) {
        self.records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(phase: PhaseKind, duration_min: u64) -> SessionRecord {
        let now = Utc::now();
        SessionRecord {
            phase,
            started_at: now,
            ended_at: now,
            duration_min,
        }
    }

    #[test]
    fn aggregate_buckets_by_phase() {
        let mut ledger = SessionLedger::new();
        ledger.append_record(record(PhaseKind::Study, 25));
        ledger.append_record(record(PhaseKind::Break, 5));
        ledger.append_record(record(PhaseKind::Study, 25));

        let totals = ledger.aggregate();
        assert_eq!(totals.completed_study_sessions, 2);
        assert_eq!(totals.total_study_min, 50);
        assert_eq!(totals.total_break_min, 5);
        assert_eq!(totals.total_records, 3);
    }

    #[test]
    fn aggregate_of_empty_ledger_is_zero() {
        let ledger = SessionLedger::new();
        assert_eq!(ledger.aggregate(), LedgerTotals::default());
    }

    #[test]
    fn recent_returns_tail_in_insertion_order() {
        let mut ledger = SessionLedger::new();
        for minutes in 1..=6 {
            ledger.append_record(record(PhaseKind::Study, minutes));
        }

        let tail = ledger.recent(3);
        assert_eq!(tail.len(), 3);
        assert_eq!(tail[0].duration_min, 4);
        assert_eq!(tail[2].duration_min, 6);
    }

    #[test]
    fn recent_clamps_to_ledger_size() {
        let mut ledger = SessionLedger::new();
        ledger.append_record(record(PhaseKind::Break, 5));
        assert_eq!(ledger.recent(5).len(), 1);
        assert_eq!(ledger.recent(0).len(), 0);
    }
}
