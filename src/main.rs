//! Bruschetta - A Pomodoro focus timer with a tray mirror
//!
//! This is the main entry point. It wires the timer controller, the tray
//! mirror and the feedback task together over the sync channel and runs
//! them against the headless console hosts.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use bruschetta::{
    config::Config,
    mirror::TrayMirror,
    services::{
        console::{console_input_task, ConsoleRoutes, ConsoleTray, ConsoleWindowHost, ViewPort},
        sound::sounds_dir,
        CommandSoundPlayer, IconProvider, Notifier, SilentNotifier, SilentSoundPlayer,
        SoundPlayer, SystemNotifier, TRAY_ICON_SIZE,
    },
    state::TimerController,
    sync::channel,
    tasks::{feedback_task, tray_mirror_task, TimerTask},
    utils::shutdown_signal,
    window::WindowLifecycle,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("bruschetta={}", config.log_level()))
        .init();

    let durations = config.durations()?;
    info!("Starting bruschetta v1.0.0");
    info!(
        "Configuration: profile={:?}, focus={}min, break={}min, resources={}",
        config.profile,
        durations.focus_minutes(),
        durations.break_minutes(),
        config.resources.display()
    );

    let (sync, commands) = channel();
    let (window_tx, window_rx) = mpsc::unbounded_channel();
    let (click_tx, click_rx) = mpsc::unbounded_channel();
    let view_port = ViewPort::default();

    // Tray mirror
    let icons = IconProvider::new(config.icons_dir())
        .load_set(TRAY_ICON_SIZE)
        .await;
    let mirror = TrayMirror::new(ConsoleTray, icons, sync.commands());
    tokio::spawn(tray_mirror_task(mirror, sync.subscribe(), click_rx));

    // Sounds and notifications
    let sound: Arc<dyn SoundPlayer> = if config.no_sound {
        Arc::new(SilentSoundPlayer)
    } else {
        match CommandSoundPlayer::for_platform(sounds_dir(&config.resources)) {
            Ok(player) => Arc::new(player),
            Err(e) => {
                tracing::warn!("Sound disabled: {}", e);
                Arc::new(SilentSoundPlayer)
            }
        }
    };
    let notifier: Arc<dyn Notifier> = if config.no_notifications {
        Arc::new(SilentNotifier)
    } else {
        Arc::new(SystemNotifier::new("Bruschetta"))
    };
    tokio::spawn(feedback_task(sync.subscribe(), sound, notifier));

    // Menu and shortcut input
    tokio::spawn(console_input_task(ConsoleRoutes {
        commands: sync.commands(),
        tray_clicks: click_tx,
        window_events: window_tx.clone(),
        view: view_port.clone(),
    }));

    // Timer controller with the primary window
    let controller = TimerController::new(
        durations,
        config.profile.seconds_per_minute(),
        sync.publisher(),
    );
    let windows = WindowLifecycle::new(ConsoleWindowHost::new(
        sync.clone(),
        durations,
        window_tx,
        view_port,
    ));

    TimerTask::new(controller, windows, commands, window_rx)
        .run(shutdown_signal())
        .await;

    info!("Shutdown complete");
    Ok(())
}
