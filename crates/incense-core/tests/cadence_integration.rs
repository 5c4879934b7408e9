//! Integration tests for the async driver on tokio's paused clock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use incense_core::{
    drive, Chime, ChimeError, Command, Event, HistoryStore, ManualClock, MemoryHistoryStore, NoopChime,
    SessionRecorder, StickLength, TimerController,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

struct PanickyChime(Arc<AtomicUsize>);

impl Chime for PanickyChime {
    fn ring(&self) -> Result<(), ChimeError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        panic!("speaker on fire");
    }
}

struct Harness {
    commands: mpsc::Sender<Command>,
    events: mpsc::UnboundedReceiver<Event>,
    store: MemoryHistoryStore,
    handle: JoinHandle<TimerController<MemoryHistoryStore>>,
}

fn start_harness(minutes: u32, chime: Box<dyn Chime>) -> Harness {
    let store = MemoryHistoryStore::new();
    let recorder = SessionRecorder::load(store.clone(), Arc::new(ManualClock::new(1_000_000)));
    let controller = TimerController::new(StickLength::from_minutes(minutes).unwrap(), recorder, chime);
    let (commands, cmd_rx) = mpsc::channel(16);
    let (ev_tx, events) = mpsc::unbounded_channel();
    let handle = tokio::spawn(drive(controller, cmd_rx, Some(ev_tx)));
    Harness {
        commands,
        events,
        store,
        handle,
    }
}

async fn remaining(commands: &mpsc::Sender<Command>) -> u32 {
    let (tx, rx) = oneshot::channel();
    commands.send(Command::Snapshot(tx)).await.unwrap();
    match rx.await.unwrap() {
        Event::StateSnapshot { remaining_secs, .. } => remaining_secs,
        other => panic!("expected snapshot, got {other:?}"),
    }
}

fn drain(events: &mut mpsc::UnboundedReceiver<Event>) -> Vec<Event> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

#[tokio::test(start_paused = true)]
async fn full_session_emits_events_in_order() {
    let mut h = start_harness(5, Box::new(NoopChime));
    h.commands.send(Command::Start).await.unwrap();
    tokio::time::sleep(Duration::from_secs(305)).await;

    let events = drain(&mut h.events);
    assert_eq!(
        events.first(),
        Some(&Event::TimerStarted { remaining_secs: 300, total_secs: 300, resumed: false })
    );
    let ticks = events
        .iter()
        .filter(|e| matches!(e, Event::TimerTicked { .. }))
        .count();
    assert_eq!(ticks, 299);
    let tail = &events[events.len() - 2..];
    assert_eq!(tail[0], Event::TimerCompleted { duration_secs: 300 });
    assert!(matches!(&tail[1], Event::SessionRecorded { record } if record.duration == 300));

    h.commands.send(Command::Shutdown).await.unwrap();
    let controller = h.handle.await.unwrap();
    assert_eq!(controller.history().len(), 1);
    assert_eq!(h.store.load().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn pause_wins_when_racing_a_due_tick() {
    let mut h = start_harness(5, Box::new(NoopChime));
    h.commands.send(Command::Start).await.unwrap();
    tokio::time::sleep(Duration::from_millis(3_500)).await;

    // Queue the pause without yielding, then make the next tick due.
    h.commands.try_send(Command::Pause).unwrap();
    tokio::time::advance(Duration::from_millis(500)).await;

    assert_eq!(remaining(&h.commands).await, 297);
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(remaining(&h.commands).await, 297);

    let events = drain(&mut h.events);
    assert_eq!(events.last(), Some(&Event::TimerPaused { remaining_secs: 297 }));

    // Resume continues from where it paused.
    h.commands.send(Command::Start).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    assert_eq!(remaining(&h.commands).await, 295);

    h.commands.send(Command::Shutdown).await.unwrap();
    h.handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn reset_and_duration_change_cancel_the_cadence() {
    let h = start_harness(10, Box::new(NoopChime));
    h.commands.send(Command::Start).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5_500)).await;
    h.commands.send(Command::Reset).await.unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(remaining(&h.commands).await, 600);

    h.commands.send(Command::Start).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    h.commands
        .send(Command::SetDuration(StickLength::from_minutes(45).unwrap()))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(remaining(&h.commands).await, 2700);

    h.commands.send(Command::Shutdown).await.unwrap();
    let controller = h.handle.await.unwrap();
    assert!(controller.history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn panicking_chime_is_contained() {
    let rings = Arc::new(AtomicUsize::new(0));
    let h = start_harness(5, Box::new(PanickyChime(rings.clone())));
    h.commands.send(Command::Start).await.unwrap();
    tokio::time::sleep(Duration::from_secs(301)).await;

    assert_eq!(rings.load(Ordering::SeqCst), 1);
    assert_eq!(h.store.load().len(), 1);
    // The loop is still alive and accepts commands.
    assert_eq!(remaining(&h.commands).await, 0);

    h.commands.send(Command::ClearHistory).await.unwrap();
    h.commands.send(Command::Shutdown).await.unwrap();
    let controller = h.handle.await.unwrap();
    assert!(controller.history().is_empty());
    assert!(h.store.load().is_empty());
}
