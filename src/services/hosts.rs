//! Window and tray host interfaces
//!
//! The platform owns the actual window and tray; these traits are the only
//! calls the application makes into it.

use std::fmt;

use crate::{error::HostError, mirror::MenuItem};

/// Opaque id of a window created by a [`WindowHost`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u64);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window #{}", self.0)
    }
}

/// Window lifecycle notifications raised by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The window finished loading and can be shown
    ReadyToShow,
    /// The user asked to close the window
    CloseRequested,
    /// The window was destroyed
    Closed,
    /// The app was activated (dock click or equivalent)
    Activate,
}

pub trait WindowHost: Send {
    fn create_window(&mut self) -> Result<WindowHandle, HostError>;
    fn show(&mut self, window: WindowHandle) -> Result<(), HostError>;
    fn hide(&mut self, window: WindowHandle) -> Result<(), HostError>;
    fn focus(&mut self, window: WindowHandle) -> Result<(), HostError>;
    fn restore(&mut self, window: WindowHandle) -> Result<(), HostError>;
    fn destroy(&mut self, window: WindowHandle) -> Result<(), HostError>;
    fn is_alive(&self, window: WindowHandle) -> bool;
}

/// Rendering hint for the tray title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleStyle {
    Plain,
    /// Fixed-width digits; hosts without styled titles fall back to plain
    Monospaced,
}

pub trait TrayHost: Send {
    fn set_title(&mut self, text: &str, style: TitleStyle) -> Result<(), HostError>;
    fn set_image(&mut self, icon: &[u8]) -> Result<(), HostError>;
    fn set_context_menu(&mut self, items: &[MenuItem]) -> Result<(), HostError>;
    fn is_alive(&self) -> bool;
}
