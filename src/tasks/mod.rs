//! Background tasks module
//!
//! This module contains the long-running tasks wired together by `main`.

pub mod feedback;
pub mod mirror_loop;
pub mod ticker;
pub mod timer_loop;

// Re-export main functions
pub use feedback::feedback_task;
pub use mirror_loop::tray_mirror_task;
pub use ticker::{Ticker, TICK_PERIOD};
pub use timer_loop::TimerTask;
