//! Pomodoro countdown state, independent of timers and rendering.

use serde::{Deserialize, Serialize};

pub const MIN_DURATION_MINUTES: u32 = 1;
pub const MAX_DURATION_MINUTES: u32 = 120;

/// Persisted pomodoro preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PomodoroSettings {
    /// Work phase length in minutes.
    pub work_duration: u32,
    /// Break phase length in minutes.
    pub break_duration: u32,
    pub sound_enabled: bool,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_duration: 25,
            break_duration: 5,
            sound_enabled: true,
        }
    }
}

impl PomodoroSettings {
    /// Returns a copy with both durations inside the supported range.
    pub fn clamped(self) -> Self {
        Self {
            work_duration: clamp_minutes(self.work_duration),
            break_duration: clamp_minutes(self.break_duration),
            ..self
        }
    }

    fn phase_seconds(&self, is_break: bool) -> u32 {
        let minutes = if is_break {
            self.break_duration
        } else {
            self.work_duration
        };
        clamp_minutes(minutes) * 60
    }
}

pub fn clamp_minutes(minutes: u32) -> u32 {
    minutes.clamp(MIN_DURATION_MINUTES, MAX_DURATION_MINUTES)
}

/// Phase boundary crossed by [`PomodoroSession::tick`] or [`PomodoroSession::skip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseChange {
    BreakStarted,
    WorkStarted,
}

impl PhaseChange {
    /// Notification title and body announcing the change.
    pub fn announcement(self, settings: &PomodoroSettings) -> (&'static str, String) {
        match self {
            Self::BreakStarted => (
                "¡Pomodoro completado!",
                format!("Tómate un descanso de {} minutos.", settings.break_duration),
            ),
            Self::WorkStarted => (
                "¡Descanso terminado!",
                "Es hora de volver a concentrarse.".to_string(),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PomodoroSession {
    /// Seconds remaining in the current phase.
    pub time_left: u32,
    pub is_running: bool,
    pub is_break: bool,
    pub completed_sessions: u32,
}

impl PomodoroSession {
    pub fn new(settings: &PomodoroSettings) -> Self {
        Self {
            time_left: settings.phase_seconds(false),
            is_running: false,
            is_break: false,
            completed_sessions: 0,
        }
    }

    pub fn toggle_running(&mut self) {
        self.is_running = !self.is_running;
    }

    /// Stops the timer and restarts the current phase.
    pub fn reset(&mut self, settings: &PomodoroSettings) {
        self.is_running = false;
        self.time_left = settings.phase_seconds(self.is_break);
    }

    /// Jumps to the other phase without counting a completed session.
    pub fn skip(&mut self, settings: &PomodoroSettings) -> PhaseChange {
        self.is_running = false;
        self.is_break = !self.is_break;
        self.time_left = settings.phase_seconds(self.is_break);
        if self.is_break {
            PhaseChange::BreakStarted
        } else {
            PhaseChange::WorkStarted
        }
    }

    /// Advances one second while running.
    ///
    /// Reaching zero switches phase, pauses the timer, and reports the change. Finishing a work
    /// phase counts one completed session.
    pub fn tick(&mut self, settings: &PomodoroSettings) -> Option<PhaseChange> {
        if !self.is_running {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return None;
        }
        self.is_running = false;
        if self.is_break {
            self.is_break = false;
            self.time_left = settings.phase_seconds(false);
            Some(PhaseChange::WorkStarted)
        } else {
            self.is_break = true;
            self.completed_sessions += 1;
            self.time_left = settings.phase_seconds(true);
            Some(PhaseChange::BreakStarted)
        }
    }

    /// Applies new settings; an idle timer restarts its current phase with the new length.
    pub fn apply_settings(&mut self, settings: &PomodoroSettings) {
        if !self.is_running {
            self.time_left = settings.phase_seconds(self.is_break);
        }
    }

    /// Remaining time as `MM:SS`.
    pub fn clock_label(&self) -> String {
        format!("{:02}:{:02}", self.time_left / 60, self.time_left % 60)
    }

    /// Elapsed fraction of the current phase in `0.0..=1.0`.
    pub fn progress(&self, settings: &PomodoroSettings) -> f64 {
        let total = settings.phase_seconds(self.is_break);
        let elapsed = total.saturating_sub(self.time_left);
        f64::from(elapsed) / f64::from(total)
    }
}
