//! Timer state structure and phase handling

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// The two mutually exclusive timer phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Focus,
    Break,
}

impl Mode {
    /// The phase that follows this one when its countdown completes
    pub fn other(self) -> Self {
        match self {
            Mode::Focus => Mode::Break,
            Mode::Break => Mode::Focus,
        }
    }

    /// Human readable label used by the tray status line and notifications
    pub fn label(self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::Break => "Break",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::Break => "break",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" => Ok(Mode::Focus),
            "break" => Ok(Mode::Break),
            _ => Err(SyncError::InvalidMode(s.to_string())),
        }
    }
}

/// Snapshot of the countdown, mirrored verbatim by every view and the tray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub mode: Mode,
    pub running: bool,
}

impl TimerState {
    /// Create a paused state at the start of the given phase
    pub fn idle(mode: Mode, remaining_seconds: u32) -> Self {
        Self {
            remaining_seconds,
            mode,
            running: false,
        }
    }

    /// Format the remaining time as `mm:ss`
    pub fn display_time(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    /// Status line shown in the tray menu, e.g. `Focus - Running`
    pub fn status_line(&self) -> String {
        format!(
            "{} - {}",
            self.mode.label(),
            if self.running { "Running" } else { "Paused" }
        )
    }
}

/// Format seconds as `mm:ss`; minutes are not wrapped into hours
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
