//! Tray mirror background task

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{
    mirror::{MenuAction, TrayMirror},
    services::hosts::TrayHost,
    sync::EventSubscription,
};

/// Keep the tray in step with the controller and forward menu clicks
///
/// Runs until the event channel closes or a Quit click has been forwarded.
pub async fn tray_mirror_task<H: TrayHost>(
    mut mirror: TrayMirror<H>,
    mut events: EventSubscription,
    mut clicks: mpsc::UnboundedReceiver<MenuAction>,
) {
    info!("Starting tray mirror task");
    mirror.init();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => mirror.apply(&event),
                None => {
                    debug!("Event channel closed, tray mirror stopping");
                    break;
                }
            },
            Some(action) = clicks.recv() => {
                mirror.on_menu_action(action);
                if action == MenuAction::Quit {
                    break;
                }
            }
        }
    }

    info!("Tray mirror task stopped");
}
