use std::io::BufRead;
use std::sync::Arc;

use clap::Args;
use incense_core::chime::{self, Chime, NoopChime};
use incense_core::{
    drive, Command, Config, Event, SessionRecorder, SqliteHistoryStore, StickLength, SystemClock,
    TimerController,
};
use tokio::sync::{mpsc, oneshot};

#[derive(Args)]
pub struct RunArgs {
    /// Stick length in minutes (5-60, step 5). Defaults to the configured length.
    #[arg(short, long)]
    minutes: Option<u32>,
    /// Start burning immediately
    #[arg(short, long)]
    start: bool,
    /// Do not ring on completion
    #[arg(long)]
    no_chime: bool,
    /// Also print one event per tick
    #[arg(long)]
    ticks: bool,
}

const HELP: &str = "commands: s(tart) p(ause) r(eset) d(uration) <minutes> st(atus) q(uit)";

#[derive(Debug)]
enum Input {
    Command(Command),
    Status,
    Quit,
}

fn parse_line(line: &str) -> Result<Option<Input>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let input = match verb {
        "s" | "start" => Input::Command(Command::Start),
        "p" | "pause" => Input::Command(Command::Pause),
        "r" | "reset" => Input::Command(Command::Reset),
        "d" | "duration" => {
            let minutes = words
                .next()
                .ok_or("duration needs a number of minutes")?
                .parse::<u32>()
                .map_err(|e| format!("bad minutes: {e}"))?;
            let length = StickLength::from_minutes(minutes).map_err(|e| e.to_string())?;
            Input::Command(Command::SetDuration(length))
        }
        "st" | "status" => Input::Status,
        "q" | "quit" => Input::Quit,
        other => return Err(format!("unknown command '{other}'; {HELP}")),
    };
    Ok(Some(input))
}

fn print_event(event: &Event) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::warn!(error = %e, "could not serialize event"),
    }
}

/// Read stdin on a dedicated thread and forward commands to the driver.
/// EOF and `q` both end the session.
fn spawn_input(commands: mpsc::Sender<Command>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let input = match parse_line(&line) {
                Ok(Some(input)) => input,
                Ok(None) => continue,
                Err(e) => {
                    eprintln!("{e}");
                    continue;
                }
            };
            let command = match input {
                Input::Command(command) => command,
                Input::Quit => break,
                Input::Status => {
                    let (tx, rx) = oneshot::channel();
                    if commands.blocking_send(Command::Snapshot(tx)).is_err() {
                        break;
                    }
                    if let Ok(snapshot) = rx.blocking_recv() {
                        print_event(&snapshot);
                    }
                    continue;
                }
            };
            if commands.blocking_send(command).is_err() {
                break;
            }
        }
        let _ = commands.blocking_send(Command::Shutdown);
    });
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let length = match args.minutes {
        Some(minutes) => StickLength::from_minutes(minutes)?,
        None => config.duration()?,
    };
    let chime: Box<dyn Chime> = if args.no_chime {
        Box::new(NoopChime)
    } else {
        chime::from_config(&config.chime)
    };

    let recorder = SessionRecorder::load(SqliteHistoryStore::open(), Arc::new(SystemClock));
    let controller = TimerController::new(length, recorder, chime);
    eprintln!("{length} stick ready. {HELP}");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let show_ticks = args.ticks;
    let controller = runtime.block_on(async move {
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ev_tx, mut ev_rx) = mpsc::unbounded_channel();
        if args.start {
            cmd_tx.send(Command::Start).await?;
        }
        spawn_input(cmd_tx);

        let driver = tokio::spawn(drive(controller, cmd_rx, Some(ev_tx)));
        while let Some(event) = ev_rx.recv().await {
            if show_ticks || !matches!(event, Event::TimerTicked { .. }) {
                print_event(&event);
            }
        }
        Ok::<_, Box<dyn std::error::Error>>(driver.await?)
    })?;

    print_event(&controller.snapshot());
    Ok(())
}
