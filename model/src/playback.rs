use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How often the driver is expected to call `tick`, in wall-clock milliseconds
pub const DEFAULT_TICK_MS: i64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Always at time 0
    Stopped,
    Paused,
    Playing,
}

/// What the rendering layer needs to show progress
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub current_time_ms: i64,
    pub is_playing: bool,
    pub speed_multiplier: f64,
}

/// Advances a shared playback time. Owns no timer; somebody else calls `tick` with however much
/// wall-clock time has passed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackClock {
    status: Status,
    // Always within [0, max_duration_ms]
    current_time_ms: i64,
    max_duration_ms: i64,
    speed_multiplier: f64,
}

impl PlaybackClock {
    pub fn new(max_duration_ms: i64) -> Self {
        Self {
            status: Status::Stopped,
            current_time_ms: 0,
            max_duration_ms: max_duration_ms.max(0),
            speed_multiplier: 1.0,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn current_time_ms(&self) -> i64 {
        self.current_time_ms
    }

    pub fn max_duration_ms(&self) -> i64 {
        self.max_duration_ms
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn is_playing(&self) -> bool {
        self.status == Status::Playing
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_time_ms: self.current_time_ms,
            is_playing: self.is_playing(),
            speed_multiplier: self.speed_multiplier,
        }
    }

    /// Fraction of the timeline covered so far, for a progress bar
    pub fn to_percent(&self) -> f64 {
        if self.max_duration_ms == 0 {
            0.0
        } else {
            self.current_time_ms as f64 / self.max_duration_ms as f64
        }
    }

    pub fn play(&mut self) {
        if self.status != Status::Playing {
            debug!("Playing from {}ms", self.current_time_ms);
            self.status = Status::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.status == Status::Playing {
            self.status = Status::Paused;
        }
    }

    pub fn reset(&mut self) {
        self.status = Status::Stopped;
        self.current_time_ms = 0;
    }

    pub fn set_speed(&mut self, multiplier: f64) -> Result<()> {
        if !(multiplier > 0.0 && multiplier.is_finite()) {
            return Err(Error::InvalidArgument(format!(
                "speed multiplier must be positive, not {multiplier}"
            )));
        }
        self.speed_multiplier = multiplier;
        Ok(())
    }

    /// Only moves while playing. Reaching the end pauses there.
    pub fn tick(&mut self, elapsed_wall_ms: i64) {
        if self.status != Status::Playing {
            return;
        }
        let advance = (elapsed_wall_ms.max(0) as f64 * self.speed_multiplier).round();
        // The f64 -> i64 cast saturates, and so does the add
        let next = self.current_time_ms.saturating_add(advance as i64);
        if next >= self.max_duration_ms {
            self.current_time_ms = self.max_duration_ms;
            self.status = Status::Paused;
            info!("Reached the end of the timeline at {}ms", self.max_duration_ms);
        } else {
            self.current_time_ms = next;
        }
    }

    /// Jumps anywhere on the timeline without starting or stopping playback.
    pub fn seek(&mut self, time_ms: i64) {
        self.current_time_ms = time_ms.clamp(0, self.max_duration_ms);
        self.fix_stopped();
    }

    /// Called whenever the set of tracks changes
    pub fn set_max_duration(&mut self, max_duration_ms: i64) {
        self.max_duration_ms = max_duration_ms.max(0);
        if self.current_time_ms > self.max_duration_ms {
            debug!(
                "Timeline shrank to {}ms, clamping from {}ms",
                self.max_duration_ms, self.current_time_ms
            );
            self.current_time_ms = self.max_duration_ms;
        }
    }

    // Stopped means "at the start". Once moved elsewhere while not playing, that's Paused.
    fn fix_stopped(&mut self) {
        if self.status == Status::Stopped && self.current_time_ms != 0 {
            self.status = Status::Paused;
        }
    }
}
