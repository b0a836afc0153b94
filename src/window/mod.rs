//! Primary window module
//!
//! Visibility policy for the window and the read-only view rendered in it.

pub mod lifecycle;
pub mod view;

pub use lifecycle::{Activation, CloseDecision, WindowLifecycle};
pub use view::{run_view, TimerView, ViewFrame, ViewInput};
