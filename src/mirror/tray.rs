//! Tray indicator mirroring the controller's state

use tracing::{debug, warn};

use crate::{
    services::{
        hosts::{TitleStyle, TrayHost},
        icons::{IconKey, IconSet},
    },
    state::{format_clock, TimerState},
    sync::{CommandSender, SyncEvent},
};

use super::menu::{build_menu, MenuAction};

/// Read-only copy of the timer rendered into a tray host
///
/// The mirror never changes timer state itself: menu actions are forwarded
/// to the controller as commands and the tray waits for the next report.
pub struct TrayMirror<H> {
    host: H,
    icons: IconSet,
    commands: CommandSender,
    last: Option<TimerState>,
    icon: Option<IconKey>,
}

impl<H: TrayHost> TrayMirror<H> {
    pub fn new(host: H, icons: IconSet, commands: CommandSender) -> Self {
        Self {
            host,
            icons,
            commands,
            last: None,
            icon: None,
        }
    }

    /// Paint the initial tray before any state has been reported
    pub fn init(&mut self) {
        self.set_icon(IconKey::Default);
        if let Err(e) = self.host.set_title(&format_clock(0), TitleStyle::Monospaced) {
            warn!("Failed to set tray title: {}", e);
        }
        if let Err(e) = self.host.set_context_menu(&build_menu(None)) {
            warn!("Failed to set tray menu: {}", e);
        }
    }

    /// Last state received from the controller
    pub fn state(&self) -> Option<TimerState> {
        self.last
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Update the cached state and repaint the tray
    pub fn apply(&mut self, event: &SyncEvent) {
        let state = event.state();
        if matches!(event, SyncEvent::TimerStarted(_)) && self.last == Some(state) {
            // already painted from the report that preceded it
            return;
        }

        self.last = Some(state);
        self.repaint(state);
    }

    /// Forward a menu click to the controller
    pub fn on_menu_action(&self, action: MenuAction) -> bool {
        debug!("Tray menu action {:?}", action);
        self.commands.send(action.command())
    }

    fn repaint(&mut self, state: TimerState) {
        if !self.host.is_alive() {
            debug!("Tray is gone, skipping repaint");
            return;
        }

        if let Err(e) = self.host.set_title(&state.display_time(), TitleStyle::Monospaced) {
            warn!("Failed to set tray title: {}", e);
        }

        let key = IconKey::for_mode(state.mode);
        if self.icon != Some(key) {
            self.set_icon(key);
        }

        if let Err(e) = self.host.set_context_menu(&build_menu(Some(&state))) {
            warn!("Failed to set tray menu: {}", e);
        }
    }

    fn set_icon(&mut self, key: IconKey) {
        match self.icons.get(key) {
            Some(bytes) => match self.host.set_image(bytes) {
                Ok(()) => self.icon = Some(key),
                Err(e) => warn!("Failed to set tray icon: {}", e),
            },
            None => warn!("No icon available for {:?}", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::HostError,
        mirror::MenuItem,
        state::Mode,
        sync::{channel, Command},
    };

    #[derive(Default)]
    struct RecordingTray {
        titles: Vec<String>,
        images: Vec<Vec<u8>>,
        menus: Vec<Vec<MenuItem>>,
        dead: bool,
    }

    impl TrayHost for RecordingTray {
        fn set_title(&mut self, text: &str, _style: TitleStyle) -> Result<(), HostError> {
            self.titles.push(text.to_string());
            Ok(())
        }

        fn set_image(&mut self, icon: &[u8]) -> Result<(), HostError> {
            self.images.push(icon.to_vec());
            Ok(())
        }

        fn set_context_menu(&mut self, items: &[MenuItem]) -> Result<(), HostError> {
            self.menus.push(items.to_vec());
            Ok(())
        }

        fn is_alive(&self) -> bool {
            !self.dead
        }
    }

    fn icons() -> IconSet {
        IconSet::new()
            .with(IconKey::Default, vec![0])
            .with(IconKey::Focus, vec![1])
    }

    #[test]
    fn repaints_title_icon_and_menu() {
        let (channel, _commands) = channel();
        let mut mirror = TrayMirror::new(RecordingTray::default(), icons(), channel.commands());
        mirror.init();

        let running = TimerState {
            running: true,
            ..TimerState::idle(Mode::Focus, 1499)
        };
        mirror.apply(&SyncEvent::ReportState(running));

        let tray = mirror.host();
        assert_eq!(tray.titles, vec!["00:00", "24:59"]);
        assert_eq!(tray.images, vec![vec![0], vec![1]]);
        assert_eq!(tray.menus.last().unwrap()[0].label, "Focus - Running");
        assert_eq!(mirror.state(), Some(running));
    }

    #[test]
    fn break_without_asset_uses_default_icon() {
        let (channel, _commands) = channel();
        let mut mirror = TrayMirror::new(RecordingTray::default(), icons(), channel.commands());
        mirror.apply(&SyncEvent::ReportState(TimerState::idle(Mode::Break, 300)));
        assert_eq!(mirror.host().images, vec![vec![0]]);
    }

    #[test]
    fn icon_is_only_swapped_on_mode_change() {
        let (channel, _commands) = channel();
        let mut mirror = TrayMirror::new(RecordingTray::default(), icons(), channel.commands());
        mirror.apply(&SyncEvent::ReportState(TimerState::idle(Mode::Focus, 10)));
        mirror.apply(&SyncEvent::ReportState(TimerState::idle(Mode::Focus, 9)));
        assert_eq!(mirror.host().images.len(), 1);
        assert_eq!(mirror.host().titles, vec!["00:10", "00:09"]);
    }

    #[test]
    fn dead_tray_is_not_touched() {
        let (channel, _commands) = channel();
        let tray = RecordingTray {
            dead: true,
            ..RecordingTray::default()
        };
        let mut mirror = TrayMirror::new(tray, icons(), channel.commands());
        let state = TimerState::idle(Mode::Focus, 60);
        mirror.apply(&SyncEvent::ReportState(state));
        assert!(mirror.host().titles.is_empty());
        assert_eq!(mirror.state(), Some(state));
    }

    #[test]
    fn menu_actions_only_send_commands() {
        let (channel, mut commands) = channel();
        let mut mirror = TrayMirror::new(RecordingTray::default(), icons(), channel.commands());
        let state = TimerState::idle(Mode::Focus, 1500);
        mirror.apply(&SyncEvent::ReportState(state));

        assert!(mirror.on_menu_action(MenuAction::Toggle));
        assert!(mirror.on_menu_action(MenuAction::Reset));
        assert_eq!(commands.try_recv(), Some(Command::Toggle));
        assert_eq!(commands.try_recv(), Some(Command::Reset));
        assert_eq!(commands.try_recv(), None);
        assert_eq!(mirror.state(), Some(state));
    }
}
