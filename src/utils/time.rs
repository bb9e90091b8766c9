use std::time::{Duration, Instant};

use crate::settings::ViewerSettings;

/// Frame clock for the render loop.
///
/// Measures the time between ticks and clamps it, so that a stalled frame
/// (window dragged, tab in background) does not skip through whole clips.
pub struct FrameClock {
    last_tick: Instant,
    max_delta: Duration,
    /// Clamped time since last tick
    pub delta: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::from_settings(&ViewerSettings::default())
    }
}

impl FrameClock {
    /// Creates a clock starting from now.
    #[must_use]
    pub fn new(max_delta: Duration) -> Self {
        Self {
            last_tick: Instant::now(),
            max_delta,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &ViewerSettings) -> Self {
        Self::new(settings.max_frame_duration())
    }

    #[must_use]
    pub fn max_delta(&self) -> Duration {
        self.max_delta
    }

    /// Advances the clock and returns the clamped delta in seconds.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Same as [`FrameClock::tick`] with an explicit timestamp.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let raw = now.saturating_duration_since(self.last_tick);
        self.delta = raw.min(self.max_delta);
        self.last_tick = now;
        self.frame_count += 1;
        self.dt_seconds()
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}
