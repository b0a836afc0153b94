//! Bruschetta - A Pomodoro focus timer with a tray mirror
//!
//! A single controller owns the countdown and reports every change over a
//! typed sync channel; the tray and the window only mirror what they are sent
//! and answer with commands.

pub mod config;
pub mod error;
pub mod mirror;
pub mod services;
pub mod state;
pub mod sync;
pub mod tasks;
pub mod utils;
pub mod window;

// Re-export commonly used types
pub use config::{Config, Profile};
pub use error::{FeedbackError, HostError, SyncError};
pub use state::{DurationSettings, Mode, TimerController, TimerState};
pub use sync::{channel, Command, SyncChannel, SyncEvent};
pub use tasks::TimerTask;
pub use utils::signals::shutdown_signal;
