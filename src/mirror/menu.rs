//! Tray context menu

use crate::{state::TimerState, sync::Command};

/// Actions that can be triggered from the tray context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ShowApp,
    Toggle,
    Reset,
    Quit,
}

impl MenuAction {
    /// The single command this action sends to the controller
    pub fn command(self) -> Command {
        match self {
            MenuAction::ShowApp => Command::ShowWindow,
            MenuAction::Toggle => Command::Toggle,
            MenuAction::Reset => Command::Reset,
            MenuAction::Quit => Command::Quit,
        }
    }
}

/// A single menu item. Separators are disabled items with an empty label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub enabled: bool,
    pub action: Option<MenuAction>,
}

impl MenuItem {
    fn status(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: false,
            action: None,
        }
    }

    fn action(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            enabled: true,
            action: Some(action),
        }
    }

    pub fn separator() -> Self {
        Self::status(String::new())
    }

    pub fn is_separator(&self) -> bool {
        self.label.is_empty() && self.action.is_none()
    }
}

/// Build the menu for the last known state, if any
pub fn build_menu(state: Option<&TimerState>) -> Vec<MenuItem> {
    let status = state
        .map(TimerState::status_line)
        .unwrap_or_else(|| "Waiting for timer".to_string());
    let running = state.is_some_and(|s| s.running);

    vec![
        MenuItem::status(status),
        MenuItem::separator(),
        MenuItem::action("Show App", MenuAction::ShowApp),
        MenuItem::separator(),
        MenuItem::action(if running { "Pause" } else { "Start" }, MenuAction::Toggle),
        MenuItem::action("Reset", MenuAction::Reset),
        MenuItem::separator(),
        MenuItem::action("Quit", MenuAction::Quit),
    ]
}
