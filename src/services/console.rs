//! Headless hosts that render the window and tray through the log
//!
//! Used by the binary when no native shell is attached. User input arrives
//! as lines on stdin and is routed the same way native clicks and shortcuts
//! would be.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    error::{HostError, SyncError},
    mirror::{resolve_shortcut, MenuAction, MenuItem},
    state::DurationSettings,
    sync::{Command, CommandSender, SyncChannel},
    window::{run_view, TimerView, ViewFrame, ViewInput},
};

use super::hosts::{TitleStyle, TrayHost, WindowEvent, WindowHandle, WindowHost};

/// Tray host that logs every repaint
#[derive(Debug, Default)]
pub struct ConsoleTray;

impl TrayHost for ConsoleTray {
    fn set_title(&mut self, text: &str, style: TitleStyle) -> Result<(), HostError> {
        debug!("Tray title style {:?}", style);
        info!(target: "bruschetta::tray", "title {}", text);
        Ok(())
    }

    fn set_image(&mut self, icon: &[u8]) -> Result<(), HostError> {
        info!(target: "bruschetta::tray", "icon ({} bytes)", icon.len());
        Ok(())
    }

    fn set_context_menu(&mut self, items: &[MenuItem]) -> Result<(), HostError> {
        let labels: Vec<&str> = items
            .iter()
            .filter(|item| !item.is_separator())
            .map(|item| item.label.as_str())
            .collect();
        info!(target: "bruschetta::tray", "menu [{}]", labels.join(" | "));
        Ok(())
    }

    fn is_alive(&self) -> bool {
        true
    }
}

/// Slot holding the input sender of the currently mounted view
#[derive(Debug, Clone, Default)]
pub struct ViewPort {
    slot: Arc<Mutex<Option<mpsc::UnboundedSender<ViewInput>>>>,
}

impl ViewPort {
    /// Deliver input to the mounted view; dropped if no window exists
    pub fn send(&self, input: ViewInput) -> bool {
        let delivered = self
            .slot
            .lock()
            .ok()
            .and_then(|slot| slot.as_ref().map(|tx| tx.send(input).is_ok()))
            .unwrap_or(false);

        if !delivered {
            debug!("No window is open, dropping {:?}", input);
        }
        delivered
    }

    fn attach(&self, tx: mpsc::UnboundedSender<ViewInput>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(tx);
        }
    }

    fn detach(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

struct ConsoleWindow {
    visible: Arc<AtomicBool>,
    view: JoinHandle<()>,
}

/// Window host whose windows are views rendered to the log while visible
pub struct ConsoleWindowHost {
    channel: SyncChannel,
    durations: DurationSettings,
    window_events: mpsc::UnboundedSender<WindowEvent>,
    port: ViewPort,
    next_id: u64,
    windows: HashMap<WindowHandle, ConsoleWindow>,
}

impl ConsoleWindowHost {
    pub fn new(
        channel: SyncChannel,
        durations: DurationSettings,
        window_events: mpsc::UnboundedSender<WindowEvent>,
        port: ViewPort,
    ) -> Self {
        Self {
            channel,
            durations,
            window_events,
            port,
            next_id: 0,
            windows: HashMap::new(),
        }
    }

    fn window(&self, window: WindowHandle) -> Result<&ConsoleWindow, HostError> {
        self.windows
            .get(&window)
            .ok_or_else(|| HostError::Dead(window.to_string()))
    }
}

impl WindowHost for ConsoleWindowHost {
    fn create_window(&mut self) -> Result<WindowHandle, HostError> {
        self.next_id += 1;
        let handle = WindowHandle(self.next_id);

        // Subscribe before returning so the restore that follows is not missed.
        let events = self.channel.subscribe();
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        self.port.attach(input_tx);

        let visible = Arc::new(AtomicBool::new(false));
        let shown = Arc::clone(&visible);
        let view = TimerView::new(self.durations, self.channel.commands());
        let task = tokio::spawn(run_view(view, events, input_rx, move |frame: &ViewFrame| {
            if shown.load(Ordering::Relaxed) {
                info!(
                    target: "bruschetta::window",
                    "{} {} [{}] focus {}m, break {}m",
                    frame.mode.label(),
                    frame.time,
                    frame.toggle_label,
                    frame.selected_focus,
                    frame.selected_break
                );
            }
        }));

        self.windows.insert(handle, ConsoleWindow { visible, view: task });
        if self.window_events.send(WindowEvent::ReadyToShow).is_err() {
            debug!("Controller is gone, {} will not be shown", handle);
        }
        Ok(handle)
    }

    fn show(&mut self, window: WindowHandle) -> Result<(), HostError> {
        self.window(window)?.visible.store(true, Ordering::Relaxed);
        info!(target: "bruschetta::window", "{} shown", window);
        Ok(())
    }

    fn hide(&mut self, window: WindowHandle) -> Result<(), HostError> {
        self.window(window)?.visible.store(false, Ordering::Relaxed);
        info!(target: "bruschetta::window", "{} hidden", window);
        Ok(())
    }

    fn focus(&mut self, window: WindowHandle) -> Result<(), HostError> {
        self.window(window)?;
        debug!("{} focused", window);
        Ok(())
    }

    fn restore(&mut self, window: WindowHandle) -> Result<(), HostError> {
        self.window(window)?;
        debug!("{} restored", window);
        Ok(())
    }

    fn destroy(&mut self, window: WindowHandle) -> Result<(), HostError> {
        let removed = self
            .windows
            .remove(&window)
            .ok_or_else(|| HostError::Dead(window.to_string()))?;
        removed.view.abort();
        self.port.detach();
        info!(target: "bruschetta::window", "{} destroyed", window);
        Ok(())
    }

    fn is_alive(&self, window: WindowHandle) -> bool {
        self.windows
            .get(&window)
            .is_some_and(|w| !w.view.is_finished())
    }
}

/// A parsed line of console input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    /// A global shortcut such as `CommandOrControl+R`
    Shortcut(Command),
    /// `tray <show|toggle|reset|quit>`
    Tray(MenuAction),
    /// Window buttons and pickers: `start`, `pause`, `reset`, `focus 30`, `break 10`
    View(ViewInput),
    /// `close` or `activate`
    Window(WindowEvent),
    /// A raw command message, JSON or `cmd-<name> [arg]`
    Message(Command),
}

impl ConsoleInput {
    pub fn parse(line: &str) -> Result<Self, SyncError> {
        let line = line.trim();
        if line.starts_with('{') {
            return Ok(ConsoleInput::Message(Command::from_json(line)?));
        }
        if let Some(command) = resolve_shortcut(line) {
            return Ok(ConsoleInput::Shortcut(command));
        }

        let unknown = || SyncError::UnknownCommand(line.to_string());
        let words: Vec<&str> = line.split_whitespace().collect();

        let input = match words.as_slice() {
            ["tray", "show"] => ConsoleInput::Tray(MenuAction::ShowApp),
            ["tray", "toggle"] => ConsoleInput::Tray(MenuAction::Toggle),
            ["tray", "reset"] => ConsoleInput::Tray(MenuAction::Reset),
            ["tray", "quit"] | ["quit"] => ConsoleInput::Tray(MenuAction::Quit),
            ["start"] | ["pause"] | ["toggle"] => ConsoleInput::View(ViewInput::Toggle),
            ["reset"] => ConsoleInput::View(ViewInput::Reset),
            ["focus", value] => ConsoleInput::View(ViewInput::SelectFocus(parse_minutes(value, line)?)),
            ["break", value] => ConsoleInput::View(ViewInput::SelectBreak(parse_minutes(value, line)?)),
            ["close"] => ConsoleInput::Window(WindowEvent::CloseRequested),
            ["activate"] => ConsoleInput::Window(WindowEvent::Activate),
            [name] if name.starts_with("cmd-") => ConsoleInput::Message(Command::parse(name, None)?),
            [name, arg] if name.starts_with("cmd-") => {
                ConsoleInput::Message(Command::parse(name, Some(*arg))?)
            }
            _ => return Err(unknown()),
        };
        Ok(input)
    }
}

fn parse_minutes(value: &str, line: &str) -> Result<u32, SyncError> {
    value
        .parse()
        .map_err(|_| SyncError::UnknownCommand(line.to_string()))
}

/// Senders console input is routed to
#[derive(Debug, Clone)]
pub struct ConsoleRoutes {
    pub commands: CommandSender,
    pub tray_clicks: mpsc::UnboundedSender<MenuAction>,
    pub window_events: mpsc::UnboundedSender<WindowEvent>,
    pub view: ViewPort,
}

impl ConsoleRoutes {
    pub fn dispatch(&self, input: ConsoleInput) {
        match input {
            ConsoleInput::Shortcut(command) | ConsoleInput::Message(command) => {
                self.commands.send(command);
            }
            ConsoleInput::Tray(action) => {
                if self.tray_clicks.send(action).is_err() {
                    debug!("Tray is gone, dropping {:?}", action);
                }
            }
            ConsoleInput::View(input) => {
                self.view.send(input);
            }
            ConsoleInput::Window(event) => {
                if self.window_events.send(event).is_err() {
                    debug!("Controller is gone, dropping {:?}", event);
                }
            }
        }
    }
}

/// Read stdin line by line and route each line until EOF
pub async fn console_input_task(routes: ConsoleRoutes) {
    info!("Reading input from stdin (shortcuts, `tray <action>`, `start`, `focus <min>`, `close`, `quit`)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => continue,
            Ok(Some(line)) => match ConsoleInput::parse(&line) {
                Ok(input) => routes.dispatch(input),
                Err(e) => warn!("Ignoring input: {}", e),
            },
            Ok(None) => {
                debug!("stdin closed");
                break;
            }
            Err(e) => {
                warn!("Failed to read stdin: {}", e);
                break;
            }
        }
    }
}
