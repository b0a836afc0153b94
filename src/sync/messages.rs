//! Message catalogue exchanged between the controller and its mirrors

use serde::{Deserialize, Serialize};

use crate::{
    error::SyncError,
    state::{Mode, TimerState},
};

/// State broadcasts sent by the controller to every mirror and view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum SyncEvent {
    /// Sent after every mutation
    #[serde(rename = "report-state")]
    ReportState(TimerState),
    /// A countdown reached zero; carries the state of the next phase
    #[serde(rename = "phase-complete")]
    PhaseComplete(TimerState),
    /// Full state for a surface that was just created
    #[serde(rename = "restore-state")]
    RestoreState(TimerState),
    /// The user started the countdown
    #[serde(rename = "timer-started")]
    TimerStarted(TimerState),
}

impl SyncEvent {
    /// Catalogue name of the message
    pub fn name(&self) -> &'static str {
        match self {
            SyncEvent::ReportState(_) => "report-state",
            SyncEvent::PhaseComplete(_) => "phase-complete",
            SyncEvent::RestoreState(_) => "restore-state",
            SyncEvent::TimerStarted(_) => "timer-started",
        }
    }

    /// The state snapshot carried by the message
    pub fn state(&self) -> TimerState {
        match *self {
            SyncEvent::ReportState(state)
            | SyncEvent::PhaseComplete(state)
            | SyncEvent::RestoreState(state)
            | SyncEvent::TimerStarted(state) => state,
        }
    }

    pub fn to_json(&self) -> Result<String, SyncError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SyncError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// User intents sent toward the controller. They carry parameters, never state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Command {
    #[serde(rename = "cmd-toggle")]
    Toggle,
    #[serde(rename = "cmd-reset")]
    Reset,
    #[serde(rename = "cmd-set-mode")]
    SetMode(Mode),
    #[serde(rename = "cmd-set-focus-duration")]
    SetFocusDuration(u32),
    #[serde(rename = "cmd-set-break-duration")]
    SetBreakDuration(u32),
    #[serde(rename = "cmd-show-window")]
    ShowWindow,
    #[serde(rename = "cmd-quit")]
    Quit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Toggle => "cmd-toggle",
            Command::Reset => "cmd-reset",
            Command::SetMode(_) => "cmd-set-mode",
            Command::SetFocusDuration(_) => "cmd-set-focus-duration",
            Command::SetBreakDuration(_) => "cmd-set-break-duration",
            Command::ShowWindow => "cmd-show-window",
            Command::Quit => "cmd-quit",
        }
    }

    /// Build a command from its catalogue name and an optional textual argument
    pub fn parse(name: &str, arg: Option<&str>) -> Result<Self, SyncError> {
        let minutes = |arg: Option<&str>| -> Result<u32, SyncError> {
            arg.and_then(|value| value.trim().parse().ok())
                .ok_or_else(|| SyncError::UnknownCommand(format!("{} {}", name, arg.unwrap_or(""))))
        };

        match name.trim() {
            "cmd-toggle" => Ok(Command::Toggle),
            "cmd-reset" => Ok(Command::Reset),
            "cmd-set-mode" => {
                let mode = arg.ok_or_else(|| SyncError::InvalidMode(String::new()))?;
                Ok(Command::SetMode(mode.parse()?))
            }
            "cmd-set-focus-duration" => Ok(Command::SetFocusDuration(minutes(arg)?)),
            "cmd-set-break-duration" => Ok(Command::SetBreakDuration(minutes(arg)?)),
            "cmd-show-window" => Ok(Command::ShowWindow),
            "cmd-quit" => Ok(Command::Quit),
            other => Err(SyncError::UnknownCommand(other.to_string())),
        }
    }

    pub fn to_json(&self) -> Result<String, SyncError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SyncError> {
        Ok(serde_json::from_str(json)?)
    }
}
