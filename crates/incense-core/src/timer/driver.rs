//! Async driver loop.
//!
//! One task owns the [`TimerController`] and multiplexes two sources: the
//! command channel and the cadence. Commands are polled first, so when a
//! pause and a tick become ready together the pause wins and the tick is
//! discarded with the cadence.

use tokio::sync::{mpsc, oneshot};

use super::{StickLength, TimerController};
use crate::events::Event;
use crate::history::HistoryStore;

#[derive(Debug)]
pub enum Command {
    Start,
    Pause,
    Reset,
    SetDuration(StickLength),
    ClearHistory,
    /// Reply with a state snapshot.
    Snapshot(oneshot::Sender<Event>),
    /// Stop the cadence and end the loop.
    Shutdown,
}

/// Run the controller until `Shutdown` arrives or every command sender is
/// dropped. Events go to `events` if given; a closed listener is ignored.
/// Returns the controller so the caller can inspect final state.
pub async fn drive<S: HistoryStore>(
    mut controller: TimerController<S>,
    mut commands: mpsc::Receiver<Command>,
    events: Option<mpsc::UnboundedSender<Event>>,
) -> TimerController<S> {
    let emit = |event: Event| {
        if let Some(tx) = &events {
            let _ = tx.send(event);
        }
    };

    loop {
        tokio::select! {
            biased;

            command = commands.recv() => {
                let Some(command) = command else {
                    tracing::debug!("command channel closed; stopping timer");
                    controller.shutdown();
                    break;
                };
                match command {
                    Command::Start => controller.start().into_iter().for_each(emit),
                    Command::Pause => controller.pause().into_iter().for_each(emit),
                    Command::Reset => emit(controller.reset()),
                    Command::SetDuration(length) => emit(controller.set_duration(length)),
                    Command::ClearHistory => emit(controller.clear_history()),
                    Command::Snapshot(reply) => {
                        let _ = reply.send(controller.snapshot());
                    }
                    Command::Shutdown => {
                        controller.shutdown();
                        break;
                    }
                }
            }

            _ = controller.next_tick() => {
                controller.tick().into_iter().for_each(emit);
            }
        }
    }

    controller
}
