//! Menu input parsing and command dispatch.
//!
//! Each menu entry maps to one core intent. Transition errors render as
//! a one-line notice and never terminate the loop.

use tokio::sync::mpsc::Receiver;

use studyclock_core::{ConfigUpdate, ValidationError};

use crate::config::Prefs;
use crate::render;
use crate::runtime::SessionRuntime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Configure,
    Start,
    Pause,
    Stop,
    Summary,
    Exit,
}

impl Command {
    /// Accepts the menu number or the word.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "1" | "configure" | "config" => Some(Self::Configure),
            "2" | "start" | "resume" => Some(Self::Start),
            "3" | "pause" => Some(Self::Pause),
            "4" | "stop" => Some(Self::Stop),
            "5" | "summary" => Some(Self::Summary),
            "6" | "exit" | "quit" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub async fn dispatch(
    command: Command,
    runtime: &mut SessionRuntime,
    lines: &mut Receiver<String>,
) {
    let json = runtime.json_events();
    match command {
        Command::Configure => configure(runtime, lines).await,
        Command::Start => match runtime.start().await {
            Ok(event) => render::emit_event(&event, json),
            Err(reason) => println!("{reason}"),
        },
        Command::Pause => match runtime.pause().await {
            Ok(event) => render::emit_event(&event, json),
            Err(reason) => println!("{reason}"),
        },
        Command::Stop => match runtime.stop().await {
            Ok(event) => render::emit_event(&event, json),
            Err(reason) => println!("{reason}"),
        },
        Command::Summary => {
            let (totals, recent) = runtime.summary();
            render::summary(&totals, &recent);
        }
        // Exit is handled by the main loop before dispatch.
        Command::Exit => {}
    }
}

/// Interactive configure: prompt for each duration, keep a field on
/// empty input, reject bad input per field.
async fn configure(runtime: &mut SessionRuntime, lines: &mut Receiver<String>) {
    let current = runtime.config();
    println!("\nConfigure Session Durations");
    render::rule();

    let study_minutes =
        prompt_minutes("study", "Study", current.study_minutes(), lines).await;
    let break_minutes =
        prompt_minutes("break", "Break", current.break_minutes(), lines).await;

    let outcome = runtime.configure(&ConfigUpdate {
        study_minutes,
        break_minutes,
    });
    for error in &outcome.rejected {
        eprintln!("{error}; keeping previous value");
    }

    println!("\nConfiguration saved:");
    println!("  Study: {} minutes", outcome.config.study_minutes());
    println!("  Break: {} minutes", outcome.config.break_minutes());
    if runtime.snapshot().state != studyclock_core::TimerState::Idle {
        println!("  (applies from the next phase)");
    }

    if let Err(e) = Prefs::from_config(&outcome.config).save() {
        eprintln!("warning: could not save preferences: {e}");
    }
}

async fn prompt_minutes(
    field: &'static str,
    label: &str,
    current: u32,
    lines: &mut Receiver<String>,
) -> Option<u32> {
    render::prompt(&format!("{label} duration (minutes) [current: {current}]: "));
    let line = lines.recv().await?;
    parse_minutes(field, &line)
}

/// Empty input keeps the field; non-numeric input rejects it with a
/// validation error, leaving the prior value in place.
fn parse_minutes(field: &'static str, input: &str) -> Option<u32> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    match input.parse::<u32>() {
        Ok(minutes) => Some(minutes),
        Err(_) => {
            eprintln!(
                "{}; keeping previous value",
                ValidationError::NotANumber {
                    field,
                    input: input.to_string(),
                }
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_numbers_and_words() {
        assert_eq!(Command::parse("1"), Some(Command::Configure));
        assert_eq!(Command::parse("start"), Some(Command::Start));
        assert_eq!(Command::parse(" PAUSE "), Some(Command::Pause));
        assert_eq!(Command::parse("4"), Some(Command::Stop));
        assert_eq!(Command::parse("summary"), Some(Command::Summary));
        assert_eq!(Command::parse("quit"), Some(Command::Exit));
    }

    #[test]
    fn parse_rejects_unknown_input() {
        assert_eq!(Command::parse("7"), None);
        assert_eq!(Command::parse("launch"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn parse_minutes_empty_keeps_field() {
        assert_eq!(parse_minutes("study", "   "), None);
    }

    #[test]
    fn parse_minutes_accepts_digits() {
        assert_eq!(parse_minutes("study", " 45 "), Some(45));
    }

    #[test]
    fn parse_minutes_rejects_non_numeric() {
        assert_eq!(parse_minutes("study", "abc"), None);
        assert_eq!(parse_minutes("break", "-5"), None);
    }
}
