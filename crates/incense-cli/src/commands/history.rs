use std::sync::Arc;

use chrono::{Local, TimeZone};
use clap::Subcommand;
use incense_core::{
    Clock, Database, History, HistoryStats, HistoryStore, SessionRecorder, SqliteHistoryStore,
    SystemClock,
};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List recent sessions, newest first
    List {
        /// Print the stored JSON records
        #[arg(long)]
        json: bool,
    },
    /// Session counts and burnt time, today and overall
    Stats,
    /// Delete all recorded sessions
    Clear,
}

fn format_ended(ended_at: i64) -> String {
    match Local.timestamp_millis_opt(ended_at).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => ended_at.to_string(),
    }
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteHistoryStore::new(Database::open()?);

    match action {
        HistoryAction::List { json } => {
            let history = History::from_records(store.load());
            if json {
                println!("{}", serde_json::to_string_pretty(&history)?);
            } else if history.is_empty() {
                println!("no sessions yet");
            } else {
                for record in &history {
                    println!(
                        "{}  {:>3} min",
                        format_ended(record.ended_at),
                        record.duration / 60
                    );
                }
            }
        }
        HistoryAction::Stats => {
            let history = History::from_records(store.load());
            let stats = HistoryStats::compute(&history, SystemClock.today());
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        HistoryAction::Clear => {
            let mut recorder = SessionRecorder::load(store, Arc::new(SystemClock));
            let removed = recorder.clear();
            println!("removed {removed} sessions");
        }
    }
    Ok(())
}
