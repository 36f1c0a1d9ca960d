//! End-to-end walk-throughs over the engine and the ledger together.

use std::sync::{Arc, Mutex};

use studyclock_core::{
    ConfigUpdate, PhaseKind, RecordSink, SessionConfig, SessionLedger, Tick, TimerEngine,
    TimerState,
};

fn new_engine() -> (TimerEngine, Arc<Mutex<SessionLedger>>) {
    let ledger = Arc::new(Mutex::new(SessionLedger::new()));
    let sink: Arc<Mutex<dyn RecordSink>> = ledger.clone();
    (TimerEngine::new(SessionConfig::default(), sink), ledger)
}

fn tick_n(engine: &mut TimerEngine, n: u64) -> Vec<Tick> {
    (0..n).map(|_| engine.tick()).collect()
}

#[test]
fn default_session_walkthrough() {
    let (mut engine, ledger) = new_engine();
    engine.start().unwrap();
    assert_eq!(engine.remaining_secs(), 1500);

    // 1500 ticks finish the study phase and auto-start the break.
    let ticks = tick_n(&mut engine, 1500);
    let completions: Vec<_> = ticks
        .iter()
        .filter(|t| matches!(t, Tick::Completed { .. }))
        .collect();
    assert_eq!(completions.len(), 1);
    assert!(matches!(
        completions[0],
        Tick::Completed {
            completed: PhaseKind::Study,
            next: PhaseKind::Break,
            ..
        }
    ));
    assert_eq!(engine.phase(), PhaseKind::Break);
    assert_eq!(engine.remaining_secs(), 300);

    {
        let ledger = ledger.lock().unwrap();
        assert_eq!(ledger.len(), 1);
        let record = &ledger.records()[0];
        assert_eq!(record.phase, PhaseKind::Study);
        assert_eq!(record.duration_min, 25);
        assert!(record.ended_at >= record.started_at);
    }

    // 300 more ticks finish the break and swing back to study.
    let ticks = tick_n(&mut engine, 300);
    assert_eq!(
        ticks
            .iter()
            .filter(|t| matches!(t, Tick::Completed { .. }))
            .count(),
        1
    );
    assert_eq!(engine.phase(), PhaseKind::Study);
    assert_eq!(engine.remaining_secs(), 1500);

    let totals = ledger.lock().unwrap().aggregate();
    assert_eq!(totals.completed_study_sessions, 1);
    assert_eq!(totals.total_study_min, 25);
    assert_eq!(totals.total_break_min, 5);
    assert_eq!(totals.total_records, 2);
}

#[test]
fn aggregate_after_n_study_and_m_break_completions() {
    let (mut engine, ledger) = new_engine();
    engine.configure(&ConfigUpdate {
        study_minutes: Some(2),
        break_minutes: Some(1),
    });
    engine.start().unwrap();

    // Three full study/break cycles, then one extra study phase.
    for _ in 0..3 {
        tick_n(&mut engine, 120);
        tick_n(&mut engine, 60);
    }
    tick_n(&mut engine, 120);

    let totals = ledger.lock().unwrap().aggregate();
    assert_eq!(totals.completed_study_sessions, 4);
    assert_eq!(totals.total_study_min, 4 * 2);
    assert_eq!(totals.total_break_min, 3);
    assert_eq!(totals.total_records, 7);
}

#[test]
fn stop_mid_phase_leaves_ledger_untouched() {
    let (mut engine, ledger) = new_engine();
    engine.start().unwrap();
    tick_n(&mut engine, 10);
    engine.stop().unwrap();

    assert!(ledger.lock().unwrap().is_empty());
    let snap = engine.snapshot();
    assert_eq!(snap.state, TimerState::Idle);
    assert_eq!(snap.remaining_secs, 0);
}

#[test]
fn rejected_configure_leaves_prior_value() {
    let (mut engine, _) = new_engine();
    let outcome = engine.configure(&ConfigUpdate {
        study_minutes: Some(0),
        break_minutes: None,
    });
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.config.study_minutes(), 25);

    engine.start().unwrap();
    assert_eq!(engine.remaining_secs(), 1500);
}

#[test]
fn pause_resume_loses_no_time_across_a_full_phase() {
    let (mut engine, ledger) = new_engine();
    engine.configure(&ConfigUpdate {
        study_minutes: Some(1),
        break_minutes: Some(1),
    });
    engine.start().unwrap();

    tick_n(&mut engine, 30);
    engine.pause().unwrap();
    tick_n(&mut engine, 15); // ignored
    engine.start().unwrap();
    assert_eq!(engine.remaining_secs(), 30);

    // Exactly the remaining 30 ticks complete the phase.
    let ticks = tick_n(&mut engine, 30);
    assert!(matches!(ticks.last(), Some(Tick::Completed { .. })));
    assert_eq!(ledger.lock().unwrap().len(), 1);
}

#[test]
fn recent_records_show_latest_sessions_first_to_last() {
    let (mut engine, ledger) = new_engine();
    engine.configure(&ConfigUpdate {
        study_minutes: Some(1),
        break_minutes: Some(1),
    });
    engine.start().unwrap();
    for _ in 0..8 {
        tick_n(&mut engine, 60);
    }

    let ledger = ledger.lock().unwrap();
    assert_eq!(ledger.len(), 8);
    let recent = ledger.recent(5);
    assert_eq!(recent.len(), 5);
    // Tail preserves chronological order: records 3..8 of the run.
    for pair in recent.windows(2) {
        assert!(pair[0].ended_at <= pair[1].ended_at);
        assert_eq!(pair[1].phase, pair[0].phase.opposite());
    }
}
