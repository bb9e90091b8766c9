use std::sync::Arc;

use serde::Deserialize;

use crate::animation::clip::AnimationClip;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Play to the end, then stop.
    Once,
    #[default]
    Loop,
    PingPong,
}

/// Playback handle for a single clip.
///
/// An action carries its own time cursor and running flag. It is owned by the
/// [`AnimationMixer`](crate::animation::AnimationMixer); everything else only
/// refers to it through an [`ActionHandle`](crate::animation::ActionHandle).
///
/// The lifecycle mirrors a typical mixer action:
///
/// | call       | `active` | `paused` | `time`      |
/// |------------|----------|----------|-------------|
/// | `play()`   | true     | -        | -           |
/// | `stop()`   | false    | false    | 0           |
/// | `reset()`  | -        | false    | 0           |
/// | `pause()`  | -        | true     | -           |
/// | `resume()` | -        | false    | -           |
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,

    active: bool,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            loop_mode: LoopMode::Loop,
            paused: false,
            active: false,
        }
    }

    #[must_use]
    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.clip.name
    }

    /// Rewinds the time cursor and clears the paused flag.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.paused = false;
    }

    /// Schedules the action. Does not touch the time cursor.
    pub fn play(&mut self) {
        self.active = true;
    }

    /// Unschedules the action and rewinds it.
    pub fn stop(&mut self) {
        self.active = false;
        self.reset();
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Scheduled, whether or not it is currently paused.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Scheduled and actually advancing.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active && !self.paused && self.time_scale != 0.0
    }

    /// Core logic: advance time.
    pub fn update(&mut self, dt: f32) {
        if !self.is_running() {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }

        // 1. Accumulate time
        self.time += dt * self.time_scale;

        // 2. Handle loop mode
        match self.loop_mode {
            LoopMode::Once => {
                // Clamp at either end and drop out of the schedule
                if self.time >= duration {
                    self.time = duration;
                    self.active = false;
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.active = false;
                }
            }
            LoopMode::Loop => {
                if self.time >= duration {
                    self.time %= duration;
                } else if self.time < 0.0 {
                    // Reverse playback wraps to the end
                    self.time = duration + (self.time % duration);
                }
            }
            LoopMode::PingPong => {
                let double_duration = duration * 2.0;
                let mut t = self.time % double_duration;
                if t < 0.0 {
                    t += double_duration;
                }
                if t > duration {
                    t = double_duration - t;
                }
                self.time = t;
            }
        }
    }
}
