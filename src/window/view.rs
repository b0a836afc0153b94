//! Read-only timer view shown in the primary window
//!
//! The view keeps a local copy of the last state it was sent and renders it.
//! It never counts down on its own; user input becomes commands.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{
    error::SyncError,
    state::{DurationSettings, Mode, TimerState, BREAK_DURATIONS, FOCUS_DURATIONS},
    sync::{Command, CommandSender, EventSubscription, SyncEvent},
};

/// User input on the window's controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewInput {
    Toggle,
    Reset,
    SelectFocus(u32),
    SelectBreak(u32),
}

/// Everything needed to draw the window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFrame {
    pub time: String,
    pub mode: Mode,
    pub toggle_label: &'static str,
    pub focus_options: &'static [u32],
    pub break_options: &'static [u32],
    pub selected_focus: u32,
    pub selected_break: u32,
}

pub struct TimerView {
    state: TimerState,
    /// Picker selections; local to this window
    selection: DurationSettings,
    commands: CommandSender,
}

impl TimerView {
    /// A view showing the default focus phase until a restore arrives
    pub fn new(durations: DurationSettings, commands: CommandSender) -> Self {
        Self {
            state: TimerState::idle(Mode::Focus, durations.focus_minutes() * 60),
            selection: durations,
            commands,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Replace the local copy with the state carried by an event
    ///
    /// Returns `true` if anything visible changed.
    pub fn apply(&mut self, event: &SyncEvent) -> bool {
        let state = event.state();
        let changed = state != self.state;
        self.state = state;
        changed
    }

    pub fn frame(&self) -> ViewFrame {
        ViewFrame {
            time: self.state.display_time(),
            mode: self.state.mode,
            toggle_label: if self.state.running { "Pause" } else { "Start" },
            focus_options: &FOCUS_DURATIONS,
            break_options: &BREAK_DURATIONS,
            selected_focus: self.selection.focus_minutes(),
            selected_break: self.selection.break_minutes(),
        }
    }

    /// Turn user input into a command for the controller
    pub fn handle(&mut self, input: ViewInput) -> Result<(), SyncError> {
        let command = match input {
            ViewInput::Toggle => Command::Toggle,
            ViewInput::Reset => Command::Reset,
            ViewInput::SelectFocus(minutes) => {
                self.selection.set(Mode::Focus, minutes)?;
                Command::SetFocusDuration(minutes)
            }
            ViewInput::SelectBreak(minutes) => {
                self.selection.set(Mode::Break, minutes)?;
                Command::SetBreakDuration(minutes)
            }
        };
        self.commands.send(command);
        Ok(())
    }
}

/// Drive a view until its subscription closes, rendering every change
///
/// Dropping the returned future (window destroyed) unsubscribes the view.
pub async fn run_view<F>(
    mut view: TimerView,
    mut events: EventSubscription,
    mut inputs: mpsc::UnboundedReceiver<ViewInput>,
    mut render: F,
) where
    F: FnMut(&ViewFrame),
{
    render(&view.frame());

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => {
                    if view.apply(&event) {
                        render(&view.frame());
                    }
                }
                None => {
                    debug!("Event channel closed, view stopping");
                    break;
                }
            },
            Some(input) = inputs.recv() => {
                if let Err(e) = view.handle(input) {
                    warn!("Rejected view input {:?}: {}", input, e);
                }
            }
        }
    }
}
