//! Background mirror module
//!
//! The tray indicator, its context menu and the global shortcuts. Everything
//! here reflects controller state and turns user input into commands.

pub mod menu;
pub mod shortcuts;
pub mod tray;

pub use menu::{build_menu, MenuAction, MenuItem};
pub use shortcuts::{resolve as resolve_shortcut, Shortcut, SHORTCUTS};
pub use tray::TrayMirror;
