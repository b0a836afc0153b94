//! Global keyboard shortcuts

use crate::{state::Mode, sync::Command};

/// A keyboard accelerator bound to a controller command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub accelerator: &'static str,
    pub label: &'static str,
    pub command: Command,
}

pub const SHORTCUTS: [Shortcut; 4] = [
    Shortcut {
        accelerator: "CommandOrControl+Enter",
        label: "Start/Pause",
        command: Command::Toggle,
    },
    Shortcut {
        accelerator: "CommandOrControl+R",
        label: "Reset",
        command: Command::Reset,
    },
    Shortcut {
        accelerator: "CommandOrControl+1",
        label: "Focus Mode",
        command: Command::SetMode(Mode::Focus),
    },
    Shortcut {
        accelerator: "CommandOrControl+2",
        label: "Break Mode",
        command: Command::SetMode(Mode::Break),
    },
];

/// Command bound to an accelerator, matched case-insensitively
pub fn resolve(accelerator: &str) -> Option<Command> {
    SHORTCUTS
        .iter()
        .find(|s| s.accelerator.eq_ignore_ascii_case(accelerator.trim()))
        .map(|s| s.command)
}
