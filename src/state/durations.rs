//! Selectable phase durations

use crate::error::SyncError;

use super::Mode;

/// Minute values offered by the focus picker
pub const FOCUS_DURATIONS: [u32; 5] = [25, 30, 45, 50, 55];
/// Minute values offered by the break picker
pub const BREAK_DURATIONS: [u32; 3] = [5, 10, 15];

/// Configured focus and break durations, in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationSettings {
    focus_minutes: u32,
    break_minutes: u32,
}

impl DurationSettings {
    /// Create settings, validating both values against the allowed sets
    pub fn new(focus_minutes: u32, break_minutes: u32) -> Result<Self, SyncError> {
        Ok(Self {
            focus_minutes: validate(Mode::Focus, focus_minutes)?,
            break_minutes: validate(Mode::Break, break_minutes)?,
        })
    }

    pub fn focus_minutes(&self) -> u32 {
        self.focus_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    /// Configured minutes for a mode
    pub fn minutes(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus_minutes,
            Mode::Break => self.break_minutes,
        }
    }

    /// Update the duration of one mode
    pub fn set(&mut self, mode: Mode, minutes: u32) -> Result<(), SyncError> {
        let minutes = validate(mode, minutes)?;
        match mode {
            Mode::Focus => self.focus_minutes = minutes,
            Mode::Break => self.break_minutes = minutes,
        }
        Ok(())
    }
}

impl Default for DurationSettings {
    fn default() -> Self {
        Self {
            focus_minutes: FOCUS_DURATIONS[0],
            break_minutes: BREAK_DURATIONS[0],
        }
    }
}

/// Allowed minute values for a mode
pub fn allowed_minutes(mode: Mode) -> &'static [u32] {
    match mode {
        Mode::Focus => &FOCUS_DURATIONS,
        Mode::Break => &BREAK_DURATIONS,
    }
}

fn validate(mode: Mode, minutes: u32) -> Result<u32, SyncError> {
    let allowed = allowed_minutes(mode);
    if allowed.contains(&minutes) {
        Ok(minutes)
    } else {
        Err(SyncError::InvalidDuration {
            mode,
            minutes,
            allowed,
        })
    }
}
