//! Desktop notifications at the end of a phase

use std::process::Stdio;
use chrono::{DateTime, Local};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::{
    error::FeedbackError,
    state::{Mode, TimerState},
};

/// Buttons offered on a phase-complete notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    Ok,
    Restart,
}

impl NotificationAction {
    pub fn id(self) -> &'static str {
        match self {
            NotificationAction::Ok => "ok",
            NotificationAction::Restart => "restart",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NotificationAction::Ok => "OK",
            NotificationAction::Restart => "Restart",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim() {
            "ok" => Some(NotificationAction::Ok),
            "restart" => Some(NotificationAction::Restart),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    /// Notification for a finished phase; `next` is the state after the switch
    pub fn phase_complete(finished: Mode, next: &TimerState, at: DateTime<Local>) -> Self {
        let body = match next.mode {
            Mode::Break => format!(
                "Time for a {} break. Focus ended at {}.",
                next.display_time(),
                at.format("%H:%M")
            ),
            Mode::Focus => format!(
                "Ready for {} of focus. Break ended at {}.",
                next.display_time(),
                at.format("%H:%M")
            ),
        };

        Self {
            title: format!("{} complete", finished.label()),
            body,
            actions: vec![NotificationAction::Ok, NotificationAction::Restart],
        }
    }
}

/// Best-effort notification delivery
pub trait Notifier: Send + Sync {
    fn show(&self, notification: &Notification) -> Result<(), FeedbackError>;
}

/// React to the button the user picked
pub fn handle_action(action: NotificationAction) {
    match action {
        NotificationAction::Ok => debug!("Notification acknowledged"),
        // TODO: decide whether Restart should restart the finished phase or start the next one
        NotificationAction::Restart => info!("Restart chosen on notification; no action is bound to it"),
    }
}

/// Shows notifications with the platform's notification tool
#[derive(Debug, Clone, Default)]
pub struct SystemNotifier {
    app_name: String,
}

impl SystemNotifier {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    fn command(&self, notification: &Notification) -> Result<Command, FeedbackError> {
        if cfg!(target_os = "macos") {
            let script = format!(
                r#"display notification "{}" with title "{}""#,
                escape_applescript(&notification.body),
                escape_applescript(&notification.title)
            );
            let mut command = Command::new("osascript");
            command.arg("-e").arg(script);
            Ok(command)
        } else if cfg!(target_os = "linux") {
            let mut command = Command::new("notify-send");
            command.arg(format!("--app-name={}", self.app_name));
            for action in &notification.actions {
                command.arg(format!("--action={}={}", action.id(), action.label()));
            }
            command.arg(&notification.title).arg(&notification.body);
            Ok(command)
        } else {
            Err(FeedbackError::Unsupported("notifications"))
        }
    }
}

impl Notifier for SystemNotifier {
    fn show(&self, notification: &Notification) -> Result<(), FeedbackError> {
        let mut command = self.command(notification)?;
        let program = command.as_std().get_program().to_string_lossy().into_owned();
        let child = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| FeedbackError::Spawn {
                program: program.clone(),
                source,
            })?;

        debug!("Notification shown: {}", notification.title);

        // notify-send prints the chosen action id once the notification closes
        tokio::spawn(async move {
            match child.wait_with_output().await {
                Ok(output) if output.status.success() => {
                    let chosen = String::from_utf8_lossy(&output.stdout);
                    if let Some(action) = NotificationAction::from_id(&chosen) {
                        handle_action(action);
                    }
                }
                Ok(output) => warn!(
                    "Notification failed: {}",
                    FeedbackError::Exit {
                        program,
                        code: output.status.code(),
                        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                    }
                ),
                Err(e) => warn!("Failed to wait for {}: {}", program, e),
            }
        });

        Ok(())
    }
}

/// Used when notifications are disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn show(&self, notification: &Notification) -> Result<(), FeedbackError> {
        debug!("Notifications disabled, skipping {:?}", notification.title);
        Ok(())
    }
}

fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
