//! Controller event loop
//!
//! Owns the [`TimerController`], the tick source and the primary window and
//! processes ticks, commands and window events strictly one at a time.

use std::future::Future;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    services::hosts::{WindowEvent, WindowHost},
    state::{TickOutcome, TimerController, TimerState},
    sync::{Command, CommandReceiver, EventSink},
    window::{Activation, CloseDecision, WindowLifecycle},
};

use super::ticker::Ticker;

pub struct TimerTask<S, W> {
    controller: TimerController<S>,
    windows: WindowLifecycle<W>,
    ticker: Ticker,
    commands: CommandReceiver,
    window_events: mpsc::UnboundedReceiver<WindowEvent>,
}

impl<S, W> TimerTask<S, W>
where
    S: EventSink,
    W: WindowHost,
{
    pub fn new(
        controller: TimerController<S>,
        windows: WindowLifecycle<W>,
        commands: CommandReceiver,
        window_events: mpsc::UnboundedReceiver<WindowEvent>,
    ) -> Self {
        Self {
            controller,
            windows,
            ticker: Ticker::new(),
            commands,
            window_events,
        }
    }

    /// Open the window and run until quit or `shutdown` resolves
    ///
    /// Returns the final state, which is then discarded by the caller.
    pub async fn run<F>(mut self, shutdown: F) -> TimerState
    where
        F: Future<Output = ()>,
    {
        info!("Starting timer task at {}", self.controller.state().display_time());
        tokio::pin!(shutdown);

        self.activate_window();
        self.ticker.sync(self.controller.is_running());

        loop {
            tokio::select! {
                _ = self.ticker.tick() => self.on_tick(),
                command = self.commands.recv() => match command {
                    Some(Command::Quit) => {
                        info!("Quit requested");
                        break;
                    }
                    Some(command) => self.on_command(command),
                    None => {
                        debug!("All command senders dropped");
                        break;
                    }
                },
                Some(event) = self.window_events.recv() => self.on_window_event(event),
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }
            }

            self.ticker.sync(self.controller.is_running());
        }

        // The tick must be gone before the window it renders into.
        self.ticker.cancel();
        if let Err(e) = self.windows.quit() {
            warn!("Failed to destroy window during shutdown: {}", e);
        }

        let state = self.controller.state();
        info!("Timer task stopped at {} ({})", state.display_time(), state.mode);
        state
    }

    fn on_tick(&mut self) {
        match self.controller.tick() {
            TickOutcome::Counting(remaining) => debug!("Tick, {}s left", remaining),
            TickOutcome::PhaseComplete { finished, next } => {
                debug!("{} finished, next {:?}", finished, next)
            }
            TickOutcome::Idle => {}
        }
    }

    fn on_command(&mut self, command: Command) {
        debug!("Handling {}", command.name());
        match command {
            Command::Toggle => {
                self.controller.toggle();
            }
            Command::Reset => self.controller.reset(),
            Command::SetMode(mode) => self.controller.set_mode(mode),
            Command::SetFocusDuration(minutes) => {
                if let Err(e) = self.controller.set_focus_duration(minutes) {
                    warn!("Rejected {}: {}", command.name(), e);
                }
            }
            Command::SetBreakDuration(minutes) => {
                if let Err(e) = self.controller.set_break_duration(minutes) {
                    warn!("Rejected {}: {}", command.name(), e);
                }
            }
            Command::ShowWindow => self.activate_window(),
            Command::Quit => {}
        }
    }

    fn on_window_event(&mut self, event: WindowEvent) {
        debug!("Window event {:?}", event);
        match event {
            WindowEvent::ReadyToShow => {
                if let Err(e) = self.windows.on_ready_to_show() {
                    warn!("Failed to show window: {}", e);
                }
            }
            WindowEvent::CloseRequested => match self.windows.on_close_requested() {
                Ok(CloseDecision::Hidden) => debug!("Window hidden, tick untouched"),
                Ok(decision) => debug!("Close request: {:?}", decision),
                Err(e) => warn!("Failed to hide window: {}", e),
            },
            WindowEvent::Closed => self.windows.on_closed(),
            WindowEvent::Activate => self.activate_window(),
        }
    }

    fn activate_window(&mut self) {
        match self.windows.activate() {
            Ok(Activation::Created(_)) => self.controller.restore(),
            Ok(Activation::Restored(_)) => {}
            Err(e) => warn!("Failed to activate window: {}", e),
        }
    }
}
