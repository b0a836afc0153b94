//! The authoritative timer state machine
//!
//! [`TimerController`] is the only thing allowed to mutate a [`TimerState`].
//! Every mutation is reported to its [`EventSink`] before the method returns,
//! so an observer can never see a mutation without its report.

use tracing::{debug, info};

use crate::{error::SyncError, sync::{EventSink, SyncEvent}};

use super::{DurationSettings, Mode, TimerState};

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer is paused; nothing happened.
    Idle,
    /// The countdown moved on and still has time left.
    Counting(u32),
    /// The countdown reached zero; the timer switched phase and paused.
    PhaseComplete { finished: Mode, next: TimerState },
}

/// Owns the canonical countdown, mode and running flag
#[derive(Debug)]
pub struct TimerController<S> {
    state: TimerState,
    durations: DurationSettings,
    seconds_per_minute: u32,
    sink: S,
}

impl<S: EventSink> TimerController<S> {
    /// Create a controller paused at the start of a focus phase
    pub fn new(durations: DurationSettings, seconds_per_minute: u32, sink: S) -> Self {
        let seconds_per_minute = seconds_per_minute.max(1);
        let state = TimerState::idle(
            Mode::Focus,
            durations.focus_minutes() * seconds_per_minute,
        );
        Self::from_state(state, durations, seconds_per_minute, sink)
    }

    /// Create a controller that continues from an existing snapshot
    pub fn from_state(
        state: TimerState,
        durations: DurationSettings,
        seconds_per_minute: u32,
        sink: S,
    ) -> Self {
        Self {
            state,
            durations,
            seconds_per_minute: seconds_per_minute.max(1),
            sink,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn durations(&self) -> DurationSettings {
        self.durations
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Configured length of a phase in seconds
    pub fn phase_seconds(&self, mode: Mode) -> u32 {
        self.durations.minutes(mode) * self.seconds_per_minute
    }

    /// Start or pause the countdown, keeping the remaining time
    ///
    /// Returns `true` when the timer was started.
    pub fn toggle(&mut self) -> bool {
        self.state.running = !self.state.running;
        let started = self.state.running;
        info!(
            "Timer {} at {} ({})",
            if started { "started" } else { "paused" },
            self.state.display_time(),
            self.state.mode
        );
        self.report();
        if started {
            self.sink.emit(SyncEvent::TimerStarted(self.state));
        }
        started
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.running {
            debug!("Tick ignored while paused");
            return TickOutcome::Idle;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds > 0 {
            self.report();
            return TickOutcome::Counting(self.state.remaining_seconds);
        }

        let finished = self.state.mode;
        let next_mode = finished.other();
        self.state = TimerState::idle(next_mode, self.phase_seconds(next_mode));
        info!(
            "{} phase complete, {} ready at {}",
            finished.label(),
            next_mode,
            self.state.display_time()
        );
        self.sink.emit(SyncEvent::PhaseComplete(self.state));
        self.report();
        TickOutcome::PhaseComplete {
            finished,
            next: self.state,
        }
    }

    /// Pause and return to the start of a focus phase
    pub fn reset(&mut self) {
        self.state = TimerState::idle(Mode::Focus, self.phase_seconds(Mode::Focus));
        info!("Timer reset to {}", self.state.display_time());
        self.report();
    }

    /// Pause and jump to the start of the given phase
    pub fn set_mode(&mut self, mode: Mode) {
        self.state = TimerState::idle(mode, self.phase_seconds(mode));
        info!("Mode set to {} at {}", mode, self.state.display_time());
        self.report();
    }

    /// Change the focus duration; applies at once only to a paused focus phase
    pub fn set_focus_duration(&mut self, minutes: u32) -> Result<(), SyncError> {
        self.set_duration(Mode::Focus, minutes)
    }

    /// Change the break duration; applies at once only to a paused break phase
    pub fn set_break_duration(&mut self, minutes: u32) -> Result<(), SyncError> {
        self.set_duration(Mode::Break, minutes)
    }

    fn set_duration(&mut self, mode: Mode, minutes: u32) -> Result<(), SyncError> {
        self.durations.set(mode, minutes)?;
        info!("{} duration set to {} min", mode.label(), minutes);

        if self.state.mode == mode && !self.state.running {
            self.state.remaining_seconds = self.phase_seconds(mode);
            self.report();
        }
        Ok(())
    }

    /// Push the full current state to a freshly created surface
    pub fn restore(&mut self) {
        debug!("Restoring state {:?}", self.state);
        self.sink.emit(SyncEvent::RestoreState(self.state));
    }

    fn report(&mut self) {
        self.sink.emit(SyncEvent::ReportState(self.state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> TimerController<Vec<SyncEvent>> {
        TimerController::new(DurationSettings::default(), 60, Vec::new())
    }

    #[test]
    fn starts_paused_in_focus() {
        let controller = controller();
        assert_eq!(controller.state(), TimerState::idle(Mode::Focus, 1500));
        assert!(controller.sink().is_empty());
    }

    #[test]
    fn toggle_reports_then_announces_start() {
        let mut controller = controller();
        assert!(controller.toggle());

        let running = TimerState {
            running: true,
            ..TimerState::idle(Mode::Focus, 1500)
        };
        assert_eq!(
            controller.sink().as_slice(),
            &[SyncEvent::ReportState(running), SyncEvent::TimerStarted(running)]
        );

        assert!(!controller.toggle());
        assert_eq!(
            controller.sink().last(),
            Some(&SyncEvent::ReportState(TimerState::idle(Mode::Focus, 1500)))
        );
    }

    #[test]
    fn tick_while_paused_is_ignored() {
        let mut controller = controller();
        assert_eq!(controller.tick(), TickOutcome::Idle);
        assert_eq!(controller.state().remaining_seconds, 1500);
        assert!(controller.sink().is_empty());
    }

    #[test]
    fn tick_decrements_by_one() {
        let mut controller = controller();
        controller.toggle();
        assert_eq!(controller.tick(), TickOutcome::Counting(1499));
        assert_eq!(controller.state().remaining_seconds, 1499);
    }

    #[test]
    fn development_profile_scales_minutes() {
        let controller = TimerController::new(DurationSettings::default(), 1, Vec::new());
        assert_eq!(controller.state().remaining_seconds, 25);
        assert_eq!(controller.phase_seconds(Mode::Break), 5);
    }
}
