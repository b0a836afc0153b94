//! Sound and notification feedback task

use std::sync::Arc;
use chrono::Local;
use tracing::{debug, info, warn};

use crate::{
    services::{
        notification::{Notification, Notifier},
        sound::{SoundKind, SoundPlayer},
    },
    sync::{EventSubscription, SyncEvent},
};

/// Play sounds and raise notifications for timer events
///
/// Collaborator failures are logged; they never stop the task.
pub async fn feedback_task(
    mut events: EventSubscription,
    sound: Arc<dyn SoundPlayer>,
    notifier: Arc<dyn Notifier>,
) {
    info!("Starting feedback task");

    while let Some(event) = events.recv().await {
        dispatch(&event, sound.as_ref(), notifier.as_ref());
    }

    debug!("Event channel closed, feedback task stopping");
}

/// Side effects for a single event
pub fn dispatch(event: &SyncEvent, sound: &dyn SoundPlayer, notifier: &dyn Notifier) {
    match event {
        SyncEvent::TimerStarted(_) => {
            if let Err(e) = sound.play(SoundKind::Start) {
                warn!("Failed to play start sound: {}", e);
            }
        }
        SyncEvent::PhaseComplete(next) => {
            if let Err(e) = sound.play(SoundKind::End) {
                warn!("Failed to play end sound: {}", e);
            }

            let notification = Notification::phase_complete(next.mode.other(), next, Local::now());
            if let Err(e) = notifier.show(&notification) {
                warn!("Failed to show notification: {}", e);
            }
        }
        SyncEvent::ReportState(_) | SyncEvent::RestoreState(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::{
        error::FeedbackError,
        state::{Mode, TimerState},
    };

    #[derive(Default)]
    struct Recorder {
        sounds: Mutex<Vec<SoundKind>>,
        titles: Mutex<Vec<String>>,
    }

    impl SoundPlayer for Recorder {
        fn play(&self, kind: SoundKind) -> Result<(), FeedbackError> {
            self.sounds.lock().unwrap().push(kind);
            Err(FeedbackError::Unsupported("sound playback"))
        }
    }

    impl Notifier for Recorder {
        fn show(&self, notification: &Notification) -> Result<(), FeedbackError> {
            self.titles.lock().unwrap().push(notification.title.clone());
            Ok(())
        }
    }

    #[test]
    fn phase_complete_plays_end_sound_and_notifies_despite_sound_failure() {
        let recorder = Recorder::default();
        let next = TimerState::idle(Mode::Break, 300);
        dispatch(&SyncEvent::PhaseComplete(next), &recorder, &recorder);

        assert_eq!(*recorder.sounds.lock().unwrap(), vec![SoundKind::End]);
        assert_eq!(*recorder.titles.lock().unwrap(), vec!["Focus complete"]);
    }

    #[test]
    fn start_plays_start_sound_only() {
        let recorder = Recorder::default();
        let state = TimerState {
            running: true,
            ..TimerState::idle(Mode::Focus, 1500)
        };
        dispatch(&SyncEvent::TimerStarted(state), &recorder, &recorder);
        dispatch(&SyncEvent::ReportState(state), &recorder, &recorder);

        assert_eq!(*recorder.sounds.lock().unwrap(), vec![SoundKind::Start]);
        assert!(recorder.titles.lock().unwrap().is_empty());
    }
}
