//! Fire-and-forget transport for state events and commands
//!
//! State events travel on a broadcast channel so any number of mirrors can
//! subscribe; commands travel on an unbounded mpsc channel to the single
//! controller. Sending to a side that is gone drops the message.

use tokio::sync::{
    broadcast::{self, error::{RecvError, TryRecvError}},
    mpsc,
};
use tracing::{debug, warn};

use super::{Command, SyncEvent};

/// Buffered state events per subscriber before it starts lagging
pub const EVENT_CAPACITY: usize = 100;

/// Destination for the controller's state events
pub trait EventSink {
    fn emit(&mut self, event: SyncEvent);
}

impl EventSink for Vec<SyncEvent> {
    fn emit(&mut self, event: SyncEvent) {
        self.push(event);
    }
}

/// Create a connected channel pair
///
/// The returned [`CommandReceiver`] belongs to the controller; the
/// [`SyncChannel`] is cloned into every mirror, view and host.
pub fn channel() -> (SyncChannel, CommandReceiver) {
    let (events, _) = broadcast::channel(EVENT_CAPACITY);
    let (commands, command_rx) = mpsc::unbounded_channel();

    (
        SyncChannel {
            events,
            commands: CommandSender { tx: commands },
        },
        CommandReceiver { rx: command_rx },
    )
}

/// Shared handle to both directions of the channel
#[derive(Debug, Clone)]
pub struct SyncChannel {
    events: broadcast::Sender<SyncEvent>,
    commands: CommandSender,
}

impl SyncChannel {
    /// Subscribe to state events published from now on
    pub fn subscribe(&self) -> EventSubscription {
        EventSubscription {
            rx: self.events.subscribe(),
        }
    }

    /// Publishing side, handed to the controller
    pub fn publisher(&self) -> EventPublisher {
        EventPublisher {
            tx: self.events.clone(),
        }
    }

    /// Command side, handed to mirrors and hosts
    pub fn commands(&self) -> CommandSender {
        self.commands.clone()
    }

    /// Number of live event subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }
}

/// Publishes controller events to all current subscribers
#[derive(Debug, Clone)]
pub struct EventPublisher {
    tx: broadcast::Sender<SyncEvent>,
}

impl EventSink for EventPublisher {
    fn emit(&mut self, event: SyncEvent) {
        match self.tx.send(event) {
            Ok(receivers) => debug!("Sent {} to {} subscriber(s)", event.name(), receivers),
            Err(_) => debug!("No subscribers for {}, dropping", event.name()),
        }
    }
}

/// Sends commands to the controller
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<Command>,
}

impl CommandSender {
    /// Send a command; returns `false` if the controller is gone
    pub fn send(&self, command: Command) -> bool {
        if self.tx.is_closed() {
            debug!("Controller is gone, dropping {}", command.name());
            return false;
        }

        match self.tx.send(command) {
            Ok(()) => {
                debug!("Queued {}", command.name());
                true
            }
            Err(_) => {
                debug!("Controller is gone, dropping {}", command.name());
                false
            }
        }
    }
}

/// Receiving end of the command channel, owned by the controller loop
#[derive(Debug)]
pub struct CommandReceiver {
    rx: mpsc::UnboundedReceiver<Command>,
}

impl CommandReceiver {
    /// Wait for the next command, or `None` once every sender is dropped
    pub async fn recv(&mut self) -> Option<Command> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Command> {
        self.rx.try_recv().ok()
    }
}

/// A live subscription to state events; dropping it unsubscribes
#[derive(Debug)]
pub struct EventSubscription {
    rx: broadcast::Receiver<SyncEvent>,
}

impl EventSubscription {
    /// Wait for the next event, or `None` once the channel is closed
    ///
    /// A subscriber that fell behind skips straight to the retained events;
    /// each one carries the full state so nothing is lost but history.
    pub async fn recv(&mut self) -> Option<SyncEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Subscriber lagged behind, skipped {} event(s)", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Take the next already-delivered event without waiting
    pub fn try_recv(&mut self) -> Option<SyncEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Subscriber lagged behind, skipped {} event(s)", skipped);
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}
