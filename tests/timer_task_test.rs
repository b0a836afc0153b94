//! Controller event loop driven on a paused clock

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
    time::Duration,
};

use bruschetta::{
    error::HostError,
    mirror::{MenuAction, MenuItem, TrayMirror},
    services::{IconKey, IconSet, TitleStyle, TrayHost, WindowEvent, WindowHandle, WindowHost},
    state::{DurationSettings, Mode, TimerController, TimerState},
    sync::{channel, Command, EventSubscription, SyncChannel, SyncEvent},
    tasks::{tray_mirror_task, TimerTask},
    window::WindowLifecycle,
};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
    time::sleep,
};

#[derive(Default)]
struct WindowLog {
    next: u64,
    alive: HashSet<WindowHandle>,
    calls: Vec<String>,
}

#[derive(Clone, Default)]
struct FakeWindows(Arc<Mutex<WindowLog>>);

impl FakeWindows {
    fn record(&self, call: String) {
        self.0.lock().unwrap().calls.push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().calls.clone()
    }
}

impl WindowHost for FakeWindows {
    fn create_window(&mut self) -> Result<WindowHandle, HostError> {
        let mut log = self.0.lock().unwrap();
        log.next += 1;
        let window = WindowHandle(log.next);
        log.alive.insert(window);
        log.calls.push(format!("create {}", window.0));
        Ok(window)
    }

    fn show(&mut self, window: WindowHandle) -> Result<(), HostError> {
        self.record(format!("show {}", window.0));
        Ok(())
    }

    fn hide(&mut self, window: WindowHandle) -> Result<(), HostError> {
        self.record(format!("hide {}", window.0));
        Ok(())
    }

    fn focus(&mut self, window: WindowHandle) -> Result<(), HostError> {
        self.record(format!("focus {}", window.0));
        Ok(())
    }

    fn restore(&mut self, window: WindowHandle) -> Result<(), HostError> {
        self.record(format!("restore {}", window.0));
        Ok(())
    }

    fn destroy(&mut self, window: WindowHandle) -> Result<(), HostError> {
        let mut log = self.0.lock().unwrap();
        log.alive.remove(&window);
        log.calls.push(format!("destroy {}", window.0));
        Ok(())
    }

    fn is_alive(&self, window: WindowHandle) -> bool {
        self.0.lock().unwrap().alive.contains(&window)
    }
}

struct Harness {
    sync: SyncChannel,
    events: EventSubscription,
    window_events: mpsc::UnboundedSender<WindowEvent>,
    windows: FakeWindows,
    stop: oneshot::Sender<()>,
    task: JoinHandle<TimerState>,
}

impl Harness {
    fn start(initial: Option<TimerState>) -> Self {
        let (sync, commands) = channel();
        let events = sync.subscribe();
        let (window_events, window_rx) = mpsc::unbounded_channel();
        let windows = FakeWindows::default();

        let controller = match initial {
            Some(state) => {
                TimerController::from_state(state, DurationSettings::default(), 60, sync.publisher())
            }
            None => TimerController::new(DurationSettings::default(), 60, sync.publisher()),
        };
        let (stop, stop_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(
            TimerTask::new(
                controller,
                WindowLifecycle::new(windows.clone()),
                commands,
                window_rx,
            )
            .run(async {
                let _ = stop_rx.await;
            }),
        );

        Self {
            sync,
            events,
            window_events,
            windows,
            stop,
            task,
        }
    }

    fn send(&self, command: Command) {
        assert!(self.sync.commands().send(command));
    }

    fn drain(&mut self) -> Vec<SyncEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    async fn stop(self) -> TimerState {
        let _ = self.stop.send(());
        self.task.await.unwrap()
    }
}

fn reports(events: &[SyncEvent]) -> Vec<TimerState> {
    events
        .iter()
        .filter_map(|event| match event {
            SyncEvent::ReportState(state) => Some(*state),
            _ => None,
        })
        .collect()
}

fn running(mode: Mode, remaining_seconds: u32) -> TimerState {
    TimerState {
        remaining_seconds,
        mode,
        running: true,
    }
}

#[tokio::test(start_paused = true)]
async fn opens_window_and_restores_state_on_start() {
    let mut harness = Harness::start(None);
    sleep(Duration::from_millis(10)).await;

    assert_eq!(
        harness.drain(),
        vec![SyncEvent::RestoreState(TimerState::idle(Mode::Focus, 1500))]
    );
    assert_eq!(harness.windows.calls(), vec!["create 1"]);
    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn ticks_once_per_second_while_running() {
    let mut harness = Harness::start(None);
    harness.send(Command::Toggle);
    sleep(Duration::from_millis(3500)).await;

    let events = harness.drain();
    assert_eq!(
        reports(&events),
        vec![
            running(Mode::Focus, 1500),
            running(Mode::Focus, 1499),
            running(Mode::Focus, 1498),
            running(Mode::Focus, 1497),
        ]
    );
    assert!(events.contains(&SyncEvent::TimerStarted(running(Mode::Focus, 1500))));
    assert_eq!(harness.stop().await, running(Mode::Focus, 1497));
}

#[tokio::test(start_paused = true)]
async fn hiding_the_window_keeps_the_tick_running() {
    let mut harness = Harness::start(None);
    harness.send(Command::Toggle);
    sleep(Duration::from_millis(1500)).await;

    harness
        .window_events
        .send(WindowEvent::CloseRequested)
        .unwrap();
    sleep(Duration::from_millis(10)).await;
    harness.drain();

    sleep(Duration::from_secs(2)).await;
    assert_eq!(
        reports(&harness.drain()),
        vec![running(Mode::Focus, 1498), running(Mode::Focus, 1497)]
    );
    assert!(harness.windows.calls().contains(&"hide 1".to_string()));
    assert!(!harness.windows.calls().iter().any(|c| c.starts_with("destroy")));
    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn pausing_stops_the_tick() {
    let mut harness = Harness::start(None);
    harness.send(Command::Toggle);
    sleep(Duration::from_millis(2500)).await;
    harness.send(Command::Toggle);
    sleep(Duration::from_millis(10)).await;
    harness.drain();

    sleep(Duration::from_secs(5)).await;
    assert!(harness.drain().is_empty());
    assert_eq!(harness.stop().await, TimerState::idle(Mode::Focus, 1498));
}

#[tokio::test(start_paused = true)]
async fn five_second_focus_completes_once() {
    let mut harness = Harness::start(Some(TimerState::idle(Mode::Focus, 5)));
    harness.send(Command::Toggle);
    sleep(Duration::from_millis(5500)).await;

    let events = harness.drain();
    let completions: Vec<&SyncEvent> = events
        .iter()
        .filter(|e| matches!(e, SyncEvent::PhaseComplete(_)))
        .collect();
    assert_eq!(
        completions,
        vec![&SyncEvent::PhaseComplete(TimerState::idle(Mode::Break, 300))]
    );

    // nothing keeps ticking after the phase switched
    sleep(Duration::from_secs(3)).await;
    assert!(harness.drain().is_empty());
    assert_eq!(harness.stop().await, TimerState::idle(Mode::Break, 300));
}

#[tokio::test(start_paused = true)]
async fn set_mode_while_running_cancels_the_tick() {
    let mut harness = Harness::start(Some(running(Mode::Focus, 600)));
    sleep(Duration::from_millis(1500)).await;

    harness.send(Command::SetMode(Mode::Break));
    sleep(Duration::from_millis(10)).await;
    assert_eq!(
        reports(&harness.drain()),
        vec![running(Mode::Focus, 599), TimerState::idle(Mode::Break, 300)]
    );

    sleep(Duration::from_secs(3)).await;
    assert!(harness.drain().is_empty());
    assert_eq!(harness.stop().await, TimerState::idle(Mode::Break, 300));
}

#[tokio::test(start_paused = true)]
async fn duplicate_resets_match_a_single_reset() {
    let mut harness = Harness::start(None);
    harness.send(Command::SetMode(Mode::Break));
    harness.send(Command::Reset);
    harness.send(Command::Reset);
    sleep(Duration::from_millis(10)).await;

    let reported = reports(&harness.drain());
    assert_eq!(reported.len(), 3);
    assert_eq!(reported[1], reported[2]);
    assert_eq!(harness.stop().await, TimerState::idle(Mode::Focus, 1500));
}

#[tokio::test(start_paused = true)]
async fn invalid_duration_command_is_ignored() {
    let mut harness = Harness::start(None);
    harness.send(Command::SetFocusDuration(20));
    harness.send(Command::SetFocusDuration(45));
    sleep(Duration::from_millis(10)).await;

    assert_eq!(
        reports(&harness.drain()),
        vec![TimerState::idle(Mode::Focus, 45 * 60)]
    );
    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn recreated_window_is_restored_with_current_state() {
    let mut harness = Harness::start(None);
    harness.send(Command::Toggle);
    sleep(Duration::from_millis(2500)).await;
    harness.drain();

    harness.window_events.send(WindowEvent::Closed).unwrap();
    harness.send(Command::ShowWindow);
    sleep(Duration::from_millis(10)).await;

    let restores: Vec<SyncEvent> = harness
        .drain()
        .into_iter()
        .filter(|e| matches!(e, SyncEvent::RestoreState(_)))
        .collect();
    assert_eq!(restores, vec![SyncEvent::RestoreState(running(Mode::Focus, 1498))]);
    assert_eq!(harness.windows.calls(), vec!["create 1", "create 2"]);
    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn activate_restores_hidden_window_without_recreating() {
    let mut harness = Harness::start(None);
    harness.window_events.send(WindowEvent::ReadyToShow).unwrap();
    harness.window_events.send(WindowEvent::CloseRequested).unwrap();
    harness.window_events.send(WindowEvent::Activate).unwrap();
    sleep(Duration::from_millis(10)).await;

    assert_eq!(
        harness.windows.calls(),
        vec!["create 1", "show 1", "hide 1", "restore 1", "show 1", "focus 1"]
    );
    assert!(!harness
        .drain()
        .iter()
        .skip(1)
        .any(|e| matches!(e, SyncEvent::RestoreState(_))));
    harness.stop().await;
}

#[tokio::test(start_paused = true)]
async fn quit_cancels_tick_and_destroys_window() {
    let harness = Harness::start(None);
    harness.send(Command::Toggle);
    sleep(Duration::from_millis(1500)).await;
    harness.send(Command::Quit);

    let windows = harness.windows.clone();
    let state = harness.task.await.unwrap();
    assert_eq!(state, running(Mode::Focus, 1499));
    assert_eq!(windows.calls().last().map(String::as_str), Some("destroy 1"));
}

#[derive(Clone, Default)]
struct RecordingTray(Arc<Mutex<Vec<String>>>);

impl RecordingTray {
    fn titles(&self) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter_map(|entry| entry.strip_prefix("title ").map(str::to_string))
            .collect()
    }

    fn last_menu(&self) -> Option<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|entry| entry.strip_prefix("menu ").map(str::to_string))
    }
}

impl TrayHost for RecordingTray {
    fn set_title(&mut self, text: &str, _style: TitleStyle) -> Result<(), HostError> {
        self.0.lock().unwrap().push(format!("title {}", text));
        Ok(())
    }

    fn set_image(&mut self, icon: &[u8]) -> Result<(), HostError> {
        self.0.lock().unwrap().push(format!("image {:?}", icon));
        Ok(())
    }

    fn set_context_menu(&mut self, items: &[MenuItem]) -> Result<(), HostError> {
        let labels: Vec<&str> = items
            .iter()
            .filter(|i| !i.is_separator())
            .map(|i| i.label.as_str())
            .collect();
        self.0
            .lock()
            .unwrap()
            .push(format!("menu {}", labels.join("|")));
        Ok(())
    }

    fn is_alive(&self) -> bool {
        true
    }
}

#[tokio::test(start_paused = true)]
async fn tray_click_round_trips_through_the_controller() {
    let harness = Harness::start(None);
    let tray = RecordingTray::default();
    let icons = IconSet::new().with(IconKey::Default, vec![0]);
    let mirror = TrayMirror::new(tray.clone(), icons, harness.sync.commands());
    let (click_tx, click_rx) = mpsc::unbounded_channel();
    let mirror_task = tokio::spawn(tray_mirror_task(mirror, harness.sync.subscribe(), click_rx));

    click_tx.send(MenuAction::Toggle).unwrap();
    sleep(Duration::from_millis(2500)).await;

    // initial paint, window restore, start report, two ticks
    assert_eq!(tray.titles(), vec!["00:00", "25:00", "25:00", "24:59", "24:58"]);
    assert_eq!(
        tray.last_menu().as_deref(),
        Some("Focus - Running|Show App|Pause|Reset|Quit")
    );

    click_tx.send(MenuAction::Quit).unwrap();
    mirror_task.await.unwrap();
    assert_eq!(harness.task.await.unwrap(), running(Mode::Focus, 1498));
}
