//! State management module
//!
//! This module contains the timer state, the configured durations and the
//! controller that owns both.

pub mod controller;
pub mod durations;
pub mod timer_state;

// Re-export main types
pub use controller::{TickOutcome, TimerController};
pub use durations::{allowed_minutes, DurationSettings, BREAK_DURATIONS, FOCUS_DURATIONS};
pub use timer_state::{format_clock, Mode, TimerState};
