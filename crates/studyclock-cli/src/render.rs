//! Terminal rendering: banner, menu, live progress line, summaries.
//!
//! Diagnostics go to stderr; everything the user asked for goes to
//! stdout. In `--json-events` mode, state-change events are emitted as
//! JSON lines instead of decorative text.

use std::io::{self, Write};

use chrono::{DateTime, Local, Utc};

use studyclock_core::{Event, LedgerTotals, PhaseKind, SessionRecord, TimerSnapshot};

const BAR_SEGMENTS: usize = 20;

pub fn banner() {
    println!("╔════════════════════════════════════════╗");
    println!("║   Studyclock - study session timer     ║");
    println!("╚════════════════════════════════════════╝");
}

pub fn rule() {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

pub fn menu() {
    println!();
    rule();
    println!("1. Configure session");
    println!("2. Start / resume");
    println!("3. Pause");
    println!("4. Stop");
    println!("5. Session summary");
    println!("6. Exit");
    rule();
    prompt("Choose an option: ");
}

pub fn prompt(text: &str) {
    print!("{text}");
    let _ = io::stdout().flush();
}

pub fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// 20-segment proportional bar with a trailing percentage.
pub fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_SEGMENTS / 100;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(BAR_SEGMENTS - filled));
    format!("{bar} {percent}%")
}

/// Overwrites the current line with live countdown state.
pub fn progress_line(snap: &TimerSnapshot) {
    let mut stdout = io::stdout();
    let _ = write!(
        stdout,
        "\r{} | {} | {} remaining ",
        snap.phase.label().to_ascii_uppercase(),
        progress_bar(snap.progress_percent),
        format_mmss(snap.remaining_secs),
    );
    let _ = stdout.flush();
}

/// Render a state-change event, or emit it as a JSON line.
pub fn emit_event(event: &Event, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("error: {e}"),
        }
        return;
    }

    match event {
        Event::PhaseStarted {
            phase,
            duration_secs,
            ..
        } => {
            println!("\nStarting {phase} session!");
            rule();
            println!("Duration: {}", format_mmss(*duration_secs));
            println!("Stay focused!");
        }
        Event::PhaseResumed {
            phase,
            remaining_secs,
            ..
        } => {
            println!(
                "\nResumed {phase} phase at {} remaining.",
                format_mmss(*remaining_secs)
            );
        }
        Event::PhasePaused {
            remaining_secs, ..
        } => {
            println!(
                "\nSession paused at {}. Start again to resume.",
                format_mmss(*remaining_secs)
            );
        }
        Event::PhaseCompleted {
            completed, next, ..
        } => {
            println!("\n{completed} phase complete; {next} phase starting.");
        }
        Event::SessionStopped {
            remaining_secs, ..
        } => {
            println!(
                "\nSession stopped with {} remaining. Nothing recorded.",
                format_mmss(*remaining_secs)
            );
        }
    }
}

/// Completion banner printed by the tick driver.
pub fn phase_completed(
    completed: PhaseKind,
    next: PhaseKind,
    completed_study_sessions: u64,
    at: DateTime<Utc>,
    json: bool,
) {
    if json {
        emit_event(
            &Event::PhaseCompleted {
                completed,
                next,
                at,
            },
            true,
        );
        return;
    }

    println!("\n");
    match completed {
        PhaseKind::Study => {
            println!("Study session completed! Great work!");
            rule();
            println!("Completed study sessions: {completed_study_sessions}");
            println!("Break time! Relax and recharge.");
        }
        PhaseKind::Break => {
            println!("Break time over! Back to studying.");
            rule();
        }
    }
}

pub fn summary(totals: &LedgerTotals, recent: &[SessionRecord]) {
    println!("\nSession Summary");
    rule();
    println!(
        "Total completed study sessions: {}",
        totals.completed_study_sessions
    );
    println!("Total sessions recorded: {}", totals.total_records);
    println!();
    println!("Total study time: {} minutes", totals.total_study_min);
    println!("Total break time: {} minutes", totals.total_break_min);

    if !recent.is_empty() {
        println!("\nRecent sessions:");
        rule();
        for record in recent {
            println!(
                "{:>5} | {} - {} | {} min",
                record.phase.label(),
                record.started_at.with_timezone(&Local).format("%H:%M:%S"),
                record.ended_at.with_timezone(&Local).format("%H:%M:%S"),
                record.duration_min,
            );
        }
    }
    println!();
}
