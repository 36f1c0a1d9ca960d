use clap::Parser;

mod commands;
mod config;
mod render;
mod runtime;

use commands::Command;
use config::Prefs;
use runtime::SessionRuntime;
use studyclock_core::{ConfigUpdate, SessionConfig};

#[derive(Parser)]
#[command(name = "studyclock", version, about = "Pomodoro-style study session timer")]
struct Cli {
    /// Study duration in minutes for this run (1-120)
    #[arg(long, value_name = "MIN")]
    study: Option<u32>,
    /// Break duration in minutes for this run (1-30)
    #[arg(long = "break", value_name = "MIN")]
    break_minutes: Option<u32>,
    /// Emit state-change events as JSON lines instead of formatted text
    #[arg(long)]
    json_events: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = SessionConfig::default();
    for error in config.apply(&Prefs::load_or_default().update()) {
        eprintln!("warning: preferences: {error}");
    }
    for error in config.apply(&ConfigUpdate {
        study_minutes: cli.study,
        break_minutes: cli.break_minutes,
    }) {
        eprintln!("error: {error}");
    }

    let mut runtime = SessionRuntime::new(config, cli.json_events);
    let mut lines = spawn_stdin_reader();

    render::banner();
    loop {
        render::menu();
        // EOF on stdin ends the session the same way as Exit.
        let Some(line) = lines.recv().await else { break };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match Command::parse(input) {
            Some(Command::Exit) => break,
            Some(command) => commands::dispatch(command, &mut runtime, &mut lines).await,
            None => println!("Invalid option. Please try again."),
        }
    }

    println!("\nShutting down...");
    runtime.shutdown().await;
    let (totals, recent) = runtime.summary();
    render::summary(&totals, &recent);
    println!("Thank you for using Studyclock!");
}

/// Reads stdin lines on a plain thread and hands them to the async loop.
fn spawn_stdin_reader() -> tokio::sync::mpsc::Receiver<String> {
    let (tx, rx) = tokio::sync::mpsc::channel(8);
    std::thread::spawn(move || {
        use std::io::BufRead;
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}
