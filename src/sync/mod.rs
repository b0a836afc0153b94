//! Sync channel module
//!
//! Typed one-way messages between the timer controller and its mirrors.

pub mod channel;
pub mod messages;

pub use channel::{
    channel, CommandReceiver, CommandSender, EventPublisher, EventSink, EventSubscription,
    SyncChannel, EVENT_CAPACITY,
};
pub use messages::{Command, SyncEvent};
