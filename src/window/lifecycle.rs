//! Primary window visibility policy

use tracing::{debug, info};

use crate::{
    error::HostError,
    services::hosts::{WindowHandle, WindowHost},
};

/// Outcome of activating the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// An existing window was restored and focused
    Restored(WindowHandle),
    /// A new window was created and needs the current state pushed to it
    Created(WindowHandle),
}

/// What happened to a window whose close was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    Hidden,
    Destroyed,
    /// There was no live window to close
    Ignored,
}

/// Tracks the single primary window
///
/// Closing only hides the window so the timer keeps running; the window is
/// destroyed for real only once the app is quitting.
pub struct WindowLifecycle<H> {
    host: H,
    window: Option<WindowHandle>,
    quitting: bool,
}

impl<H: WindowHost> WindowLifecycle<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            window: None,
            quitting: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// The primary window, if the host still considers it alive
    pub fn live_window(&mut self) -> Option<WindowHandle> {
        match self.window {
            Some(window) if self.host.is_alive(window) => Some(window),
            Some(window) => {
                debug!("{} is gone, forgetting it", window);
                self.window = None;
                None
            }
            None => None,
        }
    }

    /// Bring the window back, creating a new one if none is alive
    pub fn activate(&mut self) -> Result<Activation, HostError> {
        if let Some(window) = self.live_window() {
            self.host.restore(window)?;
            self.host.show(window)?;
            self.host.focus(window)?;
            debug!("Restored {}", window);
            return Ok(Activation::Restored(window));
        }

        let window = self.host.create_window()?;
        info!("Created {}", window);
        self.window = Some(window);
        Ok(Activation::Created(window))
    }

    pub fn on_ready_to_show(&mut self) -> Result<(), HostError> {
        match self.live_window() {
            Some(window) => self.host.show(window),
            None => Ok(()),
        }
    }

    pub fn on_close_requested(&mut self) -> Result<CloseDecision, HostError> {
        let Some(window) = self.live_window() else {
            return Ok(CloseDecision::Ignored);
        };

        if self.quitting {
            self.host.destroy(window)?;
            self.window = None;
            Ok(CloseDecision::Destroyed)
        } else {
            self.host.hide(window)?;
            info!("Hid {}; timer keeps running", window);
            Ok(CloseDecision::Hidden)
        }
    }

    /// The host destroyed the window on its own
    pub fn on_closed(&mut self) {
        if let Some(window) = self.window.take() {
            debug!("{} closed", window);
        }
    }

    /// Destroy the window as part of shutdown
    pub fn quit(&mut self) -> Result<(), HostError> {
        self.quitting = true;
        if let Some(window) = self.live_window() {
            self.host.destroy(window)?;
            self.window = None;
        }
        Ok(())
    }
}
